//! Common test utilities for request manager integration tests.
//!
//! Provides an in-memory transport with canned output and request recording.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use networker::{BoxFuture, HttpRequest, HttpResponse, Transport, TransportError, TransportOutput};
use serde::Deserialize;

/// Model used as the decode target throughout the integration tests.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockModel {
    pub id: String,
    pub name: String,
}

pub const MOCK_MODEL_JSON: &str = r#"{ "id": "123", "name": "Austin" }"#;

type Responder = dyn Fn(&HttpRequest) -> TransportOutput + Send + Sync;

/// Transport that answers every request from a closure and records what it
/// was asked to send.
#[derive(Clone)]
pub struct FakeTransport {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeTransport {
    pub fn new<R>(responder: R) -> Self
    where
        R: Fn(&HttpRequest) -> TransportOutput + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every request with `status` and an optional body.
    pub fn respond(status: u16, body: Option<&'static str>) -> Self {
        Self::new(move |request| TransportOutput {
            data: body.map(|b| Bytes::from_static(b.as_bytes())),
            response: Some(HttpResponse::new(request.url.clone(), status)),
            error: None,
        })
    }

    /// Fails every request before any response arrives.
    pub fn fail(message: &'static str) -> Self {
        Self::new(move |_| TransportOutput::failed(TransportError::Other(message.to_string())))
    }

    /// Completes every request with neither a response nor an error.
    pub fn empty() -> Self {
        Self::new(|_| TransportOutput::default())
    }

    pub fn dispatch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn dispatch(&self, request: HttpRequest) -> BoxFuture<'static, TransportOutput> {
        let output = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move { output })
    }
}
