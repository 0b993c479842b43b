//! Scripted [`Worker`] that replays queued results.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::worker::{WorkerFailure, WorkerRequest, WorkerResult};
use crate::port::outbound::worker::Worker;

#[derive(Default)]
struct Script {
    results: VecDeque<WorkerResult>,
    calls: Vec<(WorkerRequest, Duration)>,
}

/// Returns queued results in order and records every request it receives.
///
/// An exhausted script answers with [`WorkerFailure::LaunchFailed`]. Clones
/// share the script.
#[derive(Clone, Default)]
pub struct ScriptedWorker {
    script: Arc<Mutex<Script>>,
}

impl ScriptedWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation returning `payload`.
    pub fn succeed(self, payload: Value) -> Self {
        self.push(WorkerResult::Success { payload })
    }

    /// Queue a failed invocation.
    pub fn fail(self, failure: WorkerFailure) -> Self {
        self.push(WorkerResult::Failure(failure))
    }

    pub fn push(self, result: WorkerResult) -> Self {
        self.script.lock().results.push_back(result);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<WorkerRequest> {
        self.script
            .lock()
            .calls
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Timeouts passed with each request.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.script.lock().calls.iter().map(|(_, t)| *t).collect()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().calls.len()
    }
}

#[async_trait]
impl Worker for ScriptedWorker {
    async fn invoke(&self, request: &WorkerRequest, timeout: Duration) -> WorkerResult {
        let mut script = self.script.lock();
        script.calls.push((request.clone(), timeout));
        script.results.pop_front().unwrap_or_else(|| {
            WorkerResult::Failure(WorkerFailure::LaunchFailed {
                reason: format!("no scripted result for {}", request.operation()),
            })
        })
    }
}
