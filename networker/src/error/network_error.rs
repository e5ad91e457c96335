use strum::EnumIter;
use thiserror::Error;

/// Classification of request and response failures.
///
/// Every failure a caller can observe from a
/// [`RequestManager`](crate::RequestManager) is one of these values. The set
/// is closed and iterable, so table-driven tests can cover it exhaustively.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum NetworkError {
    /// The request could not be built, or the status was 400 or 402-499.
    #[error("bad request")]
    BadRequest,
    /// A URL could not be constructed. Never raised by this crate itself.
    #[error("invalid URL")]
    InvalidUrl,
    /// The transport completed without an HTTP response.
    #[error("no response")]
    NoResponse,
    /// The status was in 500-599.
    #[error("server error")]
    ServerError,
    /// The body was missing or could not be decoded into the target type.
    #[error("unable to parse response data")]
    UnableToParseData,
    /// The status was 401.
    #[error("unauthorized")]
    Unauthorized,
    /// A transport failure or a status outside every known range.
    #[error("unknown network error")]
    Unknown,
}
