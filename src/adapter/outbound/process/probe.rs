//! Readiness checks for configured worker commands.
//!
//! Nothing is executed: the program is resolved the way the OS would find
//! it, and arguments that name script files are checked for existence.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::settings::{WorkerCommand, WorkerSettings};
use crate::domain::worker::WorkerOperation;

/// Whether one operation's command looks runnable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandProbe {
    pub operation: WorkerOperation,
    pub program: String,
    /// Resolved location of the program, if found.
    pub resolved: Option<PathBuf>,
    /// Script arguments and whether each exists.
    pub scripts: Vec<ScriptProbe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptProbe {
    pub path: String,
    pub exists: bool,
}

impl CommandProbe {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.resolved.is_some() && self.scripts.iter().all(|s| s.exists)
    }
}

/// Probe every operation's command.
#[must_use]
pub fn probe_all(settings: &WorkerSettings) -> Vec<CommandProbe> {
    let base = settings.working_dir.as_deref();
    let search_path = std::env::var_os("PATH");
    WorkerOperation::ALL
        .into_iter()
        .map(|operation| {
            probe(
                operation,
                settings.command(operation),
                base,
                search_path.as_deref(),
            )
        })
        .collect()
}

fn probe(
    operation: WorkerOperation,
    command: &WorkerCommand,
    base: Option<&Path>,
    search_path: Option<&std::ffi::OsStr>,
) -> CommandProbe {
    let scripts = command
        .args
        .iter()
        .filter(|arg| looks_like_script(arg))
        .map(|arg| ScriptProbe {
            path: arg.clone(),
            exists: relative_to(base, Path::new(arg)).is_file(),
        })
        .collect();

    CommandProbe {
        operation,
        program: command.program.clone(),
        resolved: resolve_program(&command.program, base, search_path),
        scripts,
    }
}

fn looks_like_script(arg: &str) -> bool {
    !arg.starts_with('-')
        && (arg.contains('/')
            || [".py", ".sh", ".js", ".rb"]
                .iter()
                .any(|ext| arg.ends_with(ext)))
}

fn relative_to(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn resolve_program(
    program: &str,
    base: Option<&Path>,
    search_path: Option<&std::ffi::OsStr>,
) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        let path = relative_to(base, candidate);
        return path.is_file().then_some(path);
    }
    std::env::split_paths(search_path?)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
