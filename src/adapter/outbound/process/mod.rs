//! Process-backed worker adapter.
//!
//! Each worker operation maps to a configured command; requests run as
//! short-lived child processes that print one JSON document on stdout.

mod capture;
mod invoker;
pub mod probe;
mod settings;

pub use invoker::ProcessWorker;
pub use probe::{probe_all, CommandProbe};
pub use settings::{WorkerCommand, WorkerSettings};
