use reqwest::header::{HeaderValue, CACHE_CONTROL, PRAGMA};
use tracing::debug;

use super::{BoxFuture, Transport, TransportOutput};
use crate::error::{ConfigError, TransportError};
use crate::request::{CachePolicy, HttpRequest};
use crate::response::HttpResponse;

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// Honors each request's timeout. [`CachePolicy::ReloadIgnoringCacheData`]
/// is expressed as `Cache-Control: no-cache` and `Pragma: no-cache`, added
/// only when the caller has not set them.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest::Client`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn dispatch(&self, request: HttpRequest) -> BoxFuture<'static, TransportOutput> {
        let client = self.client.clone();
        Box::pin(execute(client, request))
    }
}

async fn execute(client: reqwest::Client, request: HttpRequest) -> TransportOutput {
    let mut headers = request.headers;
    if request.cache_policy == CachePolicy::ReloadIgnoringCacheData {
        for name in [CACHE_CONTROL, PRAGMA] {
            if !headers.contains_key(&name) {
                headers.insert(name, HeaderValue::from_static("no-cache"));
            }
        }
    }

    let mut builder = client
        .request(request.method.to_reqwest(), request.url)
        .headers(headers)
        .timeout(request.timeout);
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "request failed before a response arrived");
            return TransportOutput::failed(TransportError::Request(e));
        }
    };

    let http = HttpResponse {
        url: response.url().clone(),
        status: response.status().as_u16(),
        headers: response.headers().clone(),
    };

    match response.bytes().await {
        Ok(data) => TransportOutput::completed(data, http),
        Err(e) => {
            debug!(error = %e, status = http.status, "failed to read response body");
            TransportOutput {
                data: None,
                response: Some(http),
                error: Some(TransportError::Request(e)),
            }
        }
    }
}
