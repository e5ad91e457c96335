use thiserror::Error;

/// Errors raised while constructing a [`RequestManager`](crate::RequestManager).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No runtime handle was supplied and none is current.
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    /// The default HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
