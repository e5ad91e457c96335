//! Serialized delivery of completions.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single execution context that runs posted jobs one at a time, in the
/// order they were posted.
///
/// Every completion from a [`RequestManager`](crate::RequestManager) is
/// delivered here, so callers never see two completions run concurrently.
/// Cloning shares the same context; hand one queue to several managers to
/// serialize all of their completions together.
#[derive(Debug, Clone)]
pub struct CompletionQueue {
    sender: mpsc::UnboundedSender<Job>,
}

impl CompletionQueue {
    /// Starts a queue worker on `runtime`.
    ///
    /// The worker stops once every clone of the queue has been dropped.
    pub fn spawn(runtime: &Handle) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        runtime.spawn(async move {
            while let Some(job) = receiver.recv().await {
                if catch_unwind(AssertUnwindSafe(job)).is_err() {
                    error!("completion panicked");
                }
            }
        });

        Self { sender }
    }

    /// Schedules `job` to run after every job posted before it.
    pub fn post<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.sender.send(Box::new(job)).is_err() {
            warn!("completion queue is closed, dropping completion");
        }
    }
}
