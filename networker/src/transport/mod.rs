//! The transport seam.
//!
//! A [`Transport`] executes one [`HttpRequest`] and reports what came back.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! in-memory fakes that return canned output.

mod http_client;
mod task;

pub use http_client::ReqwestTransport;
pub use task::DataTask;

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use crate::error::TransportError;
use crate::request::HttpRequest;
use crate::response::HttpResponse;

/// Boxed future type for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a transport hands back for one request.
///
/// Any combination of the three may be present. A transport can report an
/// error alongside a response, e.g. when the body fails to stream after the
/// status line arrived.
#[derive(Debug, Default)]
pub struct TransportOutput {
    pub data: Option<Bytes>,
    pub response: Option<HttpResponse>,
    pub error: Option<TransportError>,
}

impl TransportOutput {
    /// Output for a request that produced a response and a body.
    pub fn completed(data: Bytes, response: HttpResponse) -> Self {
        Self {
            data: Some(data),
            response: Some(response),
            error: None,
        }
    }

    /// Output for a request that failed before any response arrived.
    pub fn failed(error: TransportError) -> Self {
        Self {
            data: None,
            response: None,
            error: Some(error),
        }
    }
}

/// Executes prepared requests.
///
/// This trait is dyn-compatible (object-safe) by returning boxed futures.
/// The returned future must resolve exactly once and must not borrow from
/// `self`, since the request manager spawns it onto the runtime.
///
/// ## Examples
///
/// ```rust
/// use networker::{BoxFuture, HttpRequest, HttpResponse, Transport, TransportOutput};
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     fn dispatch(&self, request: HttpRequest) -> BoxFuture<'static, TransportOutput> {
///         Box::pin(async move {
///             TransportOutput::completed("{}".into(), HttpResponse::new(request.url, 200))
///         })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `request` and resolves with whatever the network produced.
    fn dispatch(&self, request: HttpRequest) -> BoxFuture<'static, TransportOutput>;
}
