//! Subprocess-backed [`Worker`].

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::capture::{drain, Captured};
use super::settings::{WorkerCommand, WorkerSettings};
use crate::domain::worker::{WorkerFailure, WorkerRequest, WorkerResult};
use crate::port::outbound::worker::Worker;

/// How long output may keep arriving once the worker has exited.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Runs each request as its own child process.
///
/// The child is placed in a fresh process group; the whole group is killed
/// when the invocation ends for any reason, including the caller dropping
/// the future.
#[derive(Debug, Clone)]
pub struct ProcessWorker {
    settings: WorkerSettings,
}

impl ProcessWorker {
    #[must_use]
    pub fn new(settings: WorkerSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    fn build(&self, command: &WorkerCommand, args: &[String]) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.settings.working_dir {
            cmd.current_dir(dir);
        }
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }
        cmd
    }
}

#[async_trait]
impl Worker for ProcessWorker {
    async fn invoke(&self, request: &WorkerRequest, timeout: Duration) -> WorkerResult {
        let operation = request.operation();
        let command = self.settings.command(operation);
        let args = request.to_args();
        let limit = self.settings.max_output_bytes;

        let mut child = match self.build(command, &args).spawn() {
            Ok(child) => child,
            Err(e) => {
                return WorkerResult::Failure(WorkerFailure::LaunchFailed {
                    reason: format!("{}: {e}", command.program),
                })
            }
        };
        let group = GroupGuard::new(child.id());
        debug!(%operation, pid = ?child.id(), program = %command.program, ?args, "Worker started");

        let started = Instant::now();
        let stdout = tokio::spawn(drain(child.stdout.take(), limit));
        let stderr = tokio::spawn(drain(child.stderr.take(), limit));

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(status) => status,
            Err(_) => {
                if let Err(e) = child.kill().await {
                    warn!(%operation, error = %e, "Failed to kill timed out worker");
                }
                group.kill();
                stdout.abort();
                stderr.abort();
                return WorkerResult::Failure(WorkerFailure::Timeout {
                    elapsed: started.elapsed(),
                });
            }
        };

        // Background helpers may still hold the inherited pipes open.
        group.kill();
        let stdout = collect(stdout).await;
        let stderr = collect(stderr).await;

        let result = classify(status, stdout, stderr, limit);
        debug!(
            %operation,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = result.is_success(),
            "Worker finished"
        );
        result
    }
}

/// Wait for a drain task, giving up after [`DRAIN_GRACE`].
async fn collect(task: JoinHandle<io::Result<Captured>>) -> io::Result<Captured> {
    let abort = task.abort_handle();
    match tokio::time::timeout(DRAIN_GRACE, task).await {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => Err(io::Error::other(e)),
        Err(_) => {
            abort.abort();
            Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "output still open after the worker exited",
            ))
        }
    }
}

fn classify(
    status: io::Result<ExitStatus>,
    stdout: io::Result<Captured>,
    stderr: io::Result<Captured>,
    limit: usize,
) -> WorkerResult {
    let status = match status {
        Ok(status) => status,
        Err(e) => {
            return WorkerResult::Failure(WorkerFailure::LaunchFailed {
                reason: format!("failed to wait for worker: {e}"),
            })
        }
    };
    let stderr = stderr.map(|c| c.lossy()).unwrap_or_default();

    if !status.success() {
        return WorkerResult::Failure(WorkerFailure::NonZeroExit {
            exit_code: status.code(),
            stderr,
        });
    }

    let stdout = match stdout {
        Ok(captured) => captured,
        Err(e) => {
            return WorkerResult::Failure(WorkerFailure::MalformedOutput {
                reason: format!("failed to read stdout: {e}"),
                raw: String::new(),
            })
        }
    };
    if stdout.truncated {
        return WorkerResult::Failure(WorkerFailure::MalformedOutput {
            reason: format!("stdout exceeded {limit} bytes"),
            raw: stdout.lossy(),
        });
    }

    match serde_json::from_slice(&stdout.bytes) {
        Ok(payload) => WorkerResult::Success { payload },
        Err(e) => WorkerResult::Failure(WorkerFailure::MalformedOutput {
            reason: e.to_string(),
            raw: stdout.lossy(),
        }),
    }
}

/// Kills the worker's process group when dropped.
struct GroupGuard {
    #[cfg_attr(not(unix), allow(dead_code))]
    pgid: Option<u32>,
}

impl GroupGuard {
    fn new(pid: Option<u32>) -> Self {
        Self { pgid: pid }
    }

    /// SIGKILL every process still in the group.
    fn kill(&self) {
        #[cfg(unix)]
        {
            if let Some(pgid) = self.pgid.and_then(|p| i32::try_from(p).ok()) {
                // SAFETY: kill(2) with a negative pid signals a process group
                // and touches no memory; ESRCH for an empty group is ignored.
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
        }
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        self.kill();
    }
}
