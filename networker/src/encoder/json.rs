use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

use super::ParameterEncoder;
use crate::error::EncodingError;
use crate::params::Parameters;
use crate::request::HttpRequest;

const APPLICATION_JSON: &str = "application/json";

/// Encodes parameters as a JSON object body.
///
/// Sets `Content-Type: application/json` only when the request has no
/// `Content-Type` yet, so a caller-supplied content type always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParameterEncoder;

impl JsonParameterEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ParameterEncoder for JsonParameterEncoder {
    fn encode(
        &self,
        request: &mut HttpRequest,
        parameters: &Parameters,
    ) -> Result<(), EncodingError> {
        // serialize before touching the request
        let json = serde_json::to_vec(parameters)
            .map_err(|e| EncodingError::UnableToParse(e.to_string()))?;

        request.body = Some(Bytes::from(json));

        if !request.headers.contains_key(CONTENT_TYPE) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        Ok(())
    }
}
