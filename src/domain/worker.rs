//! Values exchanged with out-of-process analysis workers.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// What a worker is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerOperation {
    /// Find candidate items worth relisting.
    Search,
    /// Create a listing for a sourced item.
    List,
    /// Resolve the live source price of one item.
    CheckPrice,
}

impl WorkerOperation {
    /// All operations, in configuration order.
    pub const ALL: [Self; 3] = [Self::Search, Self::List, Self::CheckPrice];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::List => "list",
            Self::CheckPrice => "check_price",
        }
    }
}

impl fmt::Display for WorkerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation of a worker.
///
/// Parameters are `--key value` pairs whose order is part of the worker's
/// command-line contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRequest {
    operation: WorkerOperation,
    parameters: Vec<(String, String)>,
}

impl WorkerRequest {
    #[must_use]
    pub fn new(operation: WorkerOperation) -> Self {
        Self {
            operation,
            parameters: Vec::new(),
        }
    }

    /// Append a parameter; order of calls is preserved.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    #[must_use]
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    #[must_use]
    pub const fn operation(&self) -> WorkerOperation {
        self.operation
    }

    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Flatten parameters into `--key value` command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.parameters
            .iter()
            .flat_map(|(key, value)| [format!("--{key}"), value.clone()])
            .collect()
    }
}

/// How a worker run failed to produce a usable result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerFailure {
    /// The worker did not finish in time and was killed; partial output is
    /// discarded.
    #[error("worker timed out after {}ms", .elapsed.as_millis())]
    Timeout { elapsed: Duration },

    /// The worker exited unsuccessfully. `exit_code` is `None` when it was
    /// terminated by a signal.
    #[error("worker exited with {}: {}", describe_exit(.exit_code), .stderr.trim())]
    NonZeroExit {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Exit code 0 but stdout was not a usable document.
    #[error("worker produced malformed output: {reason}")]
    MalformedOutput { reason: String, raw: String },

    /// The worker program could not be started.
    #[error("failed to launch worker: {reason}")]
    LaunchFailed { reason: String },
}

impl WorkerFailure {
    /// Short machine-readable classification.
    #[must_use]
    pub const fn classification(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::NonZeroExit { .. } => "non_zero_exit",
            Self::MalformedOutput { .. } => "malformed_output",
            Self::LaunchFailed { .. } => "launch_failed",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, payload: &serde_json::Value) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
            raw: payload.to_string(),
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    exit_code.map_or_else(|| "signal".to_string(), |code| format!("code {code}"))
}

/// Terminal outcome of a worker run.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResult {
    Success { payload: serde_json::Value },
    Failure(WorkerFailure),
}

impl WorkerResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into a `Result`, keeping the failure classification.
    ///
    /// # Errors
    /// Returns the [`WorkerFailure`] for unsuccessful runs.
    pub fn into_payload(self) -> Result<serde_json::Value, WorkerFailure> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure(failure) => Err(failure),
        }
    }
}
