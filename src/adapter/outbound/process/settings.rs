//! Worker command configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::worker::WorkerOperation;

/// Program and fixed leading arguments for one worker operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn new<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Worker process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerSettings {
    /// Default time budget per invocation in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bytes kept from each of stdout and stderr.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
    /// Directory workers run in; inherits the current one when unset.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default = "default_search")]
    pub search: WorkerCommand,
    #[serde(default = "default_list")]
    pub list: WorkerCommand,
    #[serde(default = "default_check_price")]
    pub check_price: WorkerCommand,
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_max_output_bytes() -> usize {
    1024 * 1024
}

fn default_search() -> WorkerCommand {
    WorkerCommand::new("python3", ["scripts/product_finder.py"])
}

fn default_list() -> WorkerCommand {
    WorkerCommand::new("python3", ["scripts/ebay_lister.py"])
}

fn default_check_price() -> WorkerCommand {
    WorkerCommand::new("python3", ["scripts/product_finder.py", "--check-price-only"])
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
            working_dir: None,
            search: default_search(),
            list: default_list(),
            check_price: default_check_price(),
        }
    }
}

impl WorkerSettings {
    /// Command configured for `operation`.
    #[must_use]
    pub fn command(&self, operation: WorkerOperation) -> &WorkerCommand {
        match operation {
            WorkerOperation::Search => &self.search,
            WorkerOperation::List => &self.list,
            WorkerOperation::CheckPrice => &self.check_price,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
