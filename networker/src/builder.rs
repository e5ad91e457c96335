//! Assembles transport-ready requests.

use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::encoder::ParameterEncoder;
use crate::method::HttpMethod;
use crate::params::{Headers, Parameters};
use crate::request::{HttpRequest, RequestConfig};

/// Builds a request from a URL, method, and optional parameters and headers.
///
/// Timeout and cache policy come from `config`. Caller headers are applied
/// before the encoder runs, so the encoder can see (and must not override)
/// them.
///
/// Returns `None` if the parameters cannot be encoded or a header is not
/// valid HTTP. The cause is logged at debug level and otherwise discarded.
pub fn build_request(
    encoder: &dyn ParameterEncoder,
    config: &RequestConfig,
    url: &Url,
    method: HttpMethod,
    parameters: Option<&Parameters>,
    headers: Option<&Headers>,
) -> Option<HttpRequest> {
    let mut request = HttpRequest {
        timeout: config.timeout,
        cache_policy: config.cache_policy,
        ..HttpRequest::new(url.clone(), method)
    };

    if let Some(headers) = headers {
        for (name, value) in headers {
            let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) else {
                debug!(header = %name, "invalid header, request not built");
                return None;
            };
            request.headers.append(name, value);
        }
    }

    if let Some(parameters) = parameters {
        if let Err(e) = encoder.encode(&mut request, parameters) {
            debug!(error = %e, "parameter encoding failed, request not built");
            return None;
        }
    }

    Some(request)
}
