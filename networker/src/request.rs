//! Transport-ready request values and the per-manager request config.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

use crate::method::HttpMethod;

/// Request timeout applied when no other is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How a transport should treat cached responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Defer to the protocol's own caching rules.
    UseProtocolCachePolicy,
    /// Always go to the origin, ignoring any cached data.
    #[default]
    ReloadIgnoringCacheData,
}

/// Settings applied to every request a manager builds.
///
/// These are fixed for the lifetime of a manager; callers who need
/// different values build another manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestConfig {
    pub timeout: Duration,
    pub cache_policy: CachePolicy,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cache_policy: CachePolicy::ReloadIgnoringCacheData,
        }
    }
}

/// An HTTP request described as plain data.
///
/// Produced by the request builder and handed to a
/// [`Transport`](crate::Transport) for execution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub timeout: Duration,
    pub cache_policy: CachePolicy,
}

impl HttpRequest {
    /// Creates a request with no headers or body and the default config.
    pub fn new(url: Url, method: HttpMethod) -> Self {
        let config = RequestConfig::default();
        Self {
            url,
            method,
            headers: HeaderMap::new(),
            body: None,
            timeout: config.timeout,
            cache_policy: config.cache_policy,
        }
    }

    /// Looks up a header value by case-insensitive name.
    ///
    /// Returns `None` if the header is absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
