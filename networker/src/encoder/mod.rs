//! Parameter encoding.
//!
//! A [`ParameterEncoder`] decides how a request's [`Parameters`] end up on
//! the wire. [`JsonParameterEncoder`] is the default; other encodings are
//! alternate implementations of the same trait.

mod json;

pub use json::JsonParameterEncoder;

use crate::error::EncodingError;
use crate::params::Parameters;
use crate::request::HttpRequest;

/// Writes parameters into a request's body and headers.
///
/// Implementations must leave `request` untouched when they return an
/// error, so a failed encode never leaves a `Content-Type` behind.
///
/// ## Examples
///
/// ```rust
/// use networker::{HttpMethod, HttpRequest, JsonParameterEncoder, ParamValue, ParameterEncoder, Parameters};
/// use url::Url;
///
/// let mut request = HttpRequest::new(Url::parse("https://example.com").unwrap(), HttpMethod::Post);
/// let parameters = Parameters::from([("page".to_string(), ParamValue::from(2))]);
///
/// JsonParameterEncoder::new().encode(&mut request, &parameters).unwrap();
/// assert_eq!(request.header("content-type"), Some("application/json"));
/// ```
pub trait ParameterEncoder: Send + Sync {
    /// Encodes `parameters` into `request`.
    ///
    /// ## Errors
    ///
    /// Returns [`EncodingError::UnableToParse`] if the parameters cannot be
    /// represented in this encoding.
    fn encode(&self, request: &mut HttpRequest, parameters: &Parameters)
        -> Result<(), EncodingError>;
}
