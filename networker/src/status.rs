//! Maps HTTP status codes onto the [`NetworkError`] taxonomy.

use crate::error::NetworkError;

/// Classifies a status code.
///
/// Returns `None` for the success range (200-299). 401 is checked before
/// the general client-error range so it always maps to
/// [`NetworkError::Unauthorized`]. Any code outside the known ranges maps to
/// [`NetworkError::Unknown`], so the mapping is total.
///
/// ## Examples
///
/// ```rust
/// use networker::{classify, NetworkError};
///
/// assert_eq!(classify(204), None);
/// assert_eq!(classify(401), Some(NetworkError::Unauthorized));
/// assert_eq!(classify(404), Some(NetworkError::BadRequest));
/// assert_eq!(classify(503), Some(NetworkError::ServerError));
/// assert_eq!(classify(302), Some(NetworkError::Unknown));
/// ```
pub fn classify(status: u16) -> Option<NetworkError> {
    match status {
        200..=299 => None,
        401 => Some(NetworkError::Unauthorized),
        400 | 402..=499 => Some(NetworkError::BadRequest),
        500..=599 => Some(NetworkError::ServerError),
        _ => Some(NetworkError::Unknown),
    }
}
