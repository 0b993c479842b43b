//! Worker port: the only boundary to external analysis programs.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::worker::{WorkerRequest, WorkerResult};

/// Capability to run one worker request to completion.
///
/// Implementations never return an error: every way a run can go wrong is a
/// [`WorkerResult::Failure`] classification. Dropping the returned future
/// must not leave a running worker behind.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Run `request`, giving up after `timeout`.
    async fn invoke(&self, request: &WorkerRequest, timeout: Duration) -> WorkerResult;
}

#[async_trait]
impl<W: Worker + ?Sized> Worker for std::sync::Arc<W> {
    async fn invoke(&self, request: &WorkerRequest, timeout: Duration) -> WorkerResult {
        (**self).invoke(request, timeout).await
    }
}
