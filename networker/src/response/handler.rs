use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{HttpResponse, NetworkResponse, RawResponse};
use crate::error::{NetworkError, TransportError};

/// Turns a transport's answer into a decoded value or a [`NetworkError`].
///
/// Checks run in a fixed order, and the first one that fails decides the
/// outcome:
///
/// 1. any transport error → [`NetworkError::Unknown`]
/// 2. no HTTP response → [`NetworkError::NoResponse`]
/// 3. a failing status → the status's classification
/// 4. no body, or a body that does not decode into `T` →
///    [`NetworkError::UnableToParseData`]
///
/// A 500 with an unparseable body is therefore a `ServerError`, never an
/// `UnableToParseData`.
pub fn handle_response<T: DeserializeOwned>(
    data: Option<Bytes>,
    response: Option<HttpResponse>,
    error: Option<TransportError>,
) -> NetworkResponse<T> {
    if let Some(e) = error {
        debug!(error = %e, "transport error");
        return NetworkResponse::Failure(NetworkError::Unknown);
    }

    let Some(response) = response else {
        return NetworkResponse::Failure(NetworkError::NoResponse);
    };

    if let Some(e) = response.network_error() {
        return NetworkResponse::Failure(e);
    }

    let Some(data) = data else {
        return NetworkResponse::Failure(NetworkError::UnableToParseData);
    };

    match serde_json::from_slice::<T>(&data) {
        Ok(model) => NetworkResponse::Success(model),
        Err(e) => {
            debug!(error = %e, "response body did not decode");
            NetworkResponse::Failure(NetworkError::UnableToParseData)
        }
    }
}

/// Classifies a transport's answer without decoding the body.
///
/// Only response presence and status are consulted; a transport error is
/// ignored. A failing status still hands back the body and response so the
/// caller can inspect them.
pub fn handle_raw_response(
    data: Option<Bytes>,
    response: Option<HttpResponse>,
    _error: Option<TransportError>,
) -> RawResponse {
    let Some(response) = response else {
        return RawResponse::failure(NetworkError::NoResponse);
    };

    let error = response.network_error();
    RawResponse {
        data,
        response: Some(response),
        error,
    }
}
