use thiserror::Error;

/// Errors raised while encoding request parameters.
///
/// These never leave the request builder; a failed encode simply means no
/// request is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The parameters have no representation in the target format.
    #[error("unable to encode parameters: {0}")]
    UnableToParse(String),
}
