use thiserror::Error;

/// Errors reported by a [`Transport`](crate::Transport).
///
/// The typed response path only looks at whether one of these is present,
/// never at which one it is.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed to send the request or read the response.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The request was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,
    /// Any other transport-specific failure.
    #[error("{0}")]
    Other(String),
}
