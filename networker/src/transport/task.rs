use tokio::task::AbortHandle;
use url::Url;

use crate::method::HttpMethod;

/// Handle to one dispatched request.
///
/// Cancelling aborts the in-flight work; the request's completion is then
/// never invoked.
#[derive(Debug, Clone)]
pub struct DataTask {
    id: u64,
    method: HttpMethod,
    url: Url,
    handle: AbortHandle,
}

impl DataTask {
    pub(crate) fn new(id: u64, method: HttpMethod, url: Url, handle: AbortHandle) -> Self {
        Self {
            id,
            method,
            url,
            handle,
        }
    }

    /// Identifier unique within the manager that dispatched this task.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns `true` once the task has completed or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
