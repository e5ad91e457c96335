//! Response handling module.
//!
//! This module provides [`NetworkResponse`], the result of a typed request,
//! [`RawResponse`], the result of a raw request, and the
//! [`handle_response`] / [`handle_raw_response`] functions that turn what a
//! transport hands back into one of them.

mod handler;

pub use handler::{handle_raw_response, handle_response};

use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::NetworkError;
use crate::status::classify;

/// The HTTP part of a transport's answer: status line and headers.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HeaderMap,
}

impl HttpResponse {
    pub fn new(url: Url, status: u16) -> Self {
        Self {
            url,
            status,
            headers: HeaderMap::new(),
        }
    }

    /// The failure this response's status represents, if any.
    pub fn network_error(&self) -> Option<NetworkError> {
        classify(self.status)
    }
}

/// Outcome of a typed request.
///
/// Exactly one variant holds; failures carry a [`NetworkError`] rather than
/// raw transport or status detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkResponse<T> {
    Success(T),
    Failure(NetworkError),
}

impl<T> NetworkResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the failure, if this is one.
    pub fn error(&self) -> Option<NetworkError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(*e),
        }
    }

    /// Maps the success value, leaving failures untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> NetworkResponse<U> {
        match self {
            Self::Success(value) => NetworkResponse::Success(f(value)),
            Self::Failure(e) => NetworkResponse::Failure(e),
        }
    }

    pub fn into_result(self) -> Result<T, NetworkError> {
        self.into()
    }
}

impl<T> From<NetworkResponse<T>> for Result<T, NetworkError> {
    fn from(response: NetworkResponse<T>) -> Self {
        match response {
            NetworkResponse::Success(value) => Ok(value),
            NetworkResponse::Failure(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, NetworkError>> for NetworkResponse<T> {
    fn from(result: Result<T, NetworkError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Failure(e),
        }
    }
}

/// Outcome of a raw request: body and response as received, plus the
/// classified failure if there was one.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub data: Option<Bytes>,
    pub response: Option<HttpResponse>,
    pub error: Option<NetworkError>,
}

impl RawResponse {
    /// A response carrying only a failure.
    pub fn failure(error: NetworkError) -> Self {
        Self {
            data: None,
            response: None,
            error: Some(error),
        }
    }
}
