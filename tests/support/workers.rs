//! Shell-script workers for process tests.

use std::path::{Path, PathBuf};

use flipdesk::adapter::outbound::process::{WorkerCommand, WorkerSettings};

/// Write an executable `sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write worker script");
    let mut permissions = std::fs::metadata(&path).expect("stat script").permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("chmod script");
    path
}

/// Worker settings that run `body` under `sh -c` for every operation.
pub fn inline(body: &str) -> WorkerSettings {
    let command = WorkerCommand::new("sh", ["-c", body, "worker"]);
    WorkerSettings {
        search: command.clone(),
        list: command.clone(),
        check_price: command,
        ..WorkerSettings::default()
    }
}

/// Worker settings that run the script at `path` for every operation.
pub fn program(path: &Path) -> WorkerSettings {
    let command = WorkerCommand::new(path.to_string_lossy(), Vec::<String>::new());
    WorkerSettings {
        search: command.clone(),
        list: command.clone(),
        check_price: command,
        ..WorkerSettings::default()
    }
}
