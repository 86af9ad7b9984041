//! Background startup tasks
//!
//! App shells kick off work at construction time (loading the duress
//! settings, running the OTP reminder) without blocking the UI. Rather than
//! dropping those futures on the floor, [`spawn_reported`] routes any
//! failure to an [`ErrorSink`] the shell provides, so a broken startup task
//! surfaces somewhere a user or developer can see it.

use crate::Error;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Receiver for failures from detached tasks.
///
/// The app shell typically forwards these to its error-display surface;
/// [`LogErrorSink`] just records them.
#[async_trait]
pub trait ErrorSink: Send + Sync {
    /// Report a failed task
    async fn report(&self, task: &str, error: &Error);
}

/// Sink that logs and otherwise swallows failures
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorSink;

#[async_trait]
impl ErrorSink for LogErrorSink {
    async fn report(&self, task: &str, error: &Error) {
        tracing::error!("Startup task '{task}' failed: {error}");
    }
}

/// Spawn a startup task whose failure is reported instead of lost.
///
/// Returns the join handle; callers that care about completion can await it,
/// everyone else can drop it.
pub fn spawn_reported<F>(task: &str, future: F, sink: Arc<dyn ErrorSink>) -> JoinHandle<()>
where
    F: Future<Output = crate::Result<()>> + Send + 'static,
{
    let task = task.to_string();
    tokio::spawn(async move {
        if let Err(err) = future.await {
            tracing::warn!("Startup task '{task}' failed: {err}");
            sink.report(&task, &err).await;
        }
    })
}
