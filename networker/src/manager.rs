//! Request dispatch with tracing instrumentation.
//!
//! This module provides the [`RequestManager`], which builds a request,
//! hands it to a [`Transport`], classifies what comes back, and delivers the
//! outcome to a completion on its [`CompletionQueue`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{debug, instrument, warn, Instrument, Span};
use url::Url;

use crate::builder::build_request;
use crate::encoder::{JsonParameterEncoder, ParameterEncoder};
use crate::error::{ConfigError, NetworkError};
use crate::method::HttpMethod;
use crate::params::{Headers, Parameters};
use crate::queue::CompletionQueue;
use crate::request::{CachePolicy, HttpRequest, RequestConfig};
use crate::response::{handle_raw_response, handle_response, NetworkResponse, RawResponse};
use crate::transport::{DataTask, ReqwestTransport, Transport, TransportOutput};

/// The operations application code issues requests through.
///
/// [`RequestManager`] is the real implementation; tests substitute their
/// own to avoid the network entirely.
pub trait Requestable {
    /// Requests `url` and decodes a successful body into `T`.
    fn request<T, F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(NetworkResponse<T>) + Send + 'static;

    /// Requests `url` and hands back the raw body and response.
    fn request_raw<F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        F: FnOnce(RawResponse) + Send + 'static;

    /// Builds the request a call with these arguments would send.
    fn build_request(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
    ) -> Option<HttpRequest>;
}

/// Builder for configuring a [`RequestManager`].
#[derive(Default)]
pub struct RequestManagerBuilder {
    transport: Option<Arc<dyn Transport>>,
    encoder: Option<Arc<dyn ParameterEncoder>>,
    config: RequestConfig,
    queue: Option<CompletionQueue>,
    runtime: Option<Handle>,
}

impl RequestManagerBuilder {
    /// Sets the transport. Defaults to [`ReqwestTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets a transport that is shared with other owners.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the parameter encoder. Defaults to [`JsonParameterEncoder`].
    pub fn encoder(mut self, encoder: impl ParameterEncoder + 'static) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    /// Sets the timeout applied to every request. Defaults to 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the cache policy applied to every request. Defaults to
    /// [`CachePolicy::ReloadIgnoringCacheData`].
    pub fn cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.config.cache_policy = cache_policy;
        self
    }

    /// Delivers completions on an existing queue instead of a new one.
    pub fn completion_queue(mut self, queue: CompletionQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Runs dispatched requests on `runtime` instead of the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Builds the [`RequestManager`].
    ///
    /// ## Errors
    ///
    /// Returns an error if no runtime was given and none is current, or if
    /// the default transport cannot be constructed.
    pub fn build(self) -> Result<RequestManager, ConfigError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current()?,
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let encoder = self
            .encoder
            .unwrap_or_else(|| Arc::new(JsonParameterEncoder::new()));
        let queue = self
            .queue
            .unwrap_or_else(|| CompletionQueue::spawn(&runtime));

        Ok(RequestManager {
            transport,
            encoder,
            config: self.config,
            queue,
            runtime,
            current_task: Mutex::new(None),
            next_task_id: AtomicU64::new(0),
        })
    }
}

/// Issues HTTP requests and delivers classified outcomes.
///
/// Each call builds a request, dispatches it on the runtime, and invokes
/// its completion on the manager's [`CompletionQueue`]. The most recently
/// dispatched task is kept in a single slot; issuing a new call replaces it
/// even while the earlier one is still in flight.
///
/// ## Examples
///
/// ```rust,ignore
/// use networker::{HttpMethod, NetworkResponse, RequestManager};
/// use url::Url;
///
/// #[derive(serde::Deserialize)]
/// struct User { id: u64, name: String }
///
/// let manager = RequestManager::new()?;
/// let url = Url::parse("https://api.example.com/users/1")?;
///
/// manager.request(&url, HttpMethod::Get, None, None, |response: NetworkResponse<User>| {
///     match response {
///         NetworkResponse::Success(user) => println!("User: {}", user.name),
///         NetworkResponse::Failure(e) => eprintln!("failed: {e}"),
///     }
/// });
/// ```
pub struct RequestManager {
    transport: Arc<dyn Transport>,
    encoder: Arc<dyn ParameterEncoder>,
    config: RequestConfig,
    queue: CompletionQueue,
    runtime: Handle,
    current_task: Mutex<Option<DataTask>>,
    next_task_id: AtomicU64,
}

impl fmt::Debug for RequestManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestManager")
            .field("config", &self.config)
            .field("current_task", &self.current_task())
            .finish_non_exhaustive()
    }
}

impl RequestManager {
    /// Creates a new builder for configuring a request manager.
    pub fn builder() -> RequestManagerBuilder {
        RequestManagerBuilder::default()
    }

    /// Creates a manager with the reqwest transport, the JSON encoder, and
    /// the default config, running on the current tokio runtime.
    ///
    /// ## Errors
    ///
    /// Returns an error if called outside a tokio runtime or if the HTTP
    /// client cannot be constructed.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// The queue completions are delivered on.
    pub fn completion_queue(&self) -> &CompletionQueue {
        &self.queue
    }

    /// The most recently dispatched task, if any call has reached dispatch.
    pub fn current_task(&self) -> Option<DataTask> {
        self.lock_current_task().clone()
    }

    /// Builds the request a call with these arguments would send.
    ///
    /// Returns `None` if the parameters cannot be encoded or a header is
    /// invalid.
    pub fn build_request(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
    ) -> Option<HttpRequest> {
        build_request(
            self.encoder.as_ref(),
            &self.config,
            url,
            method,
            parameters,
            headers,
        )
    }

    /// Requests `url` and decodes a successful JSON body into `T`.
    ///
    /// If the request cannot be built, `completion` receives
    /// [`NetworkError::BadRequest`] and nothing is dispatched.
    #[instrument(
        name = "network_request",
        skip_all,
        fields(
            http.method = %method,
            http.url = %url,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub fn request<T, F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(NetworkResponse<T>) + Send + 'static,
    {
        let Some(request) = self.build_request(url, method, parameters, headers) else {
            warn!("unable to build request");
            self.queue
                .post(move || completion(NetworkResponse::Failure(NetworkError::BadRequest)));
            return;
        };

        let queue = self.queue.clone();
        self.dispatch(request, move |output| {
            let response = handle_response::<T>(output.data, output.response, output.error);
            queue.post(move || completion(response));
        });
    }

    /// Requests `url` and hands back the raw body and response.
    ///
    /// No decoding happens; only response presence and status are checked.
    /// If the request cannot be built, `completion` receives
    /// [`NetworkError::BadRequest`] with no data or response.
    #[instrument(
        name = "network_request",
        skip_all,
        fields(
            http.method = %method,
            http.url = %url,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub fn request_raw<F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        F: FnOnce(RawResponse) + Send + 'static,
    {
        let Some(request) = self.build_request(url, method, parameters, headers) else {
            warn!("unable to build request");
            self.queue
                .post(move || completion(RawResponse::failure(NetworkError::BadRequest)));
            return;
        };

        let queue = self.queue.clone();
        self.dispatch(request, move |output| {
            let response = handle_raw_response(output.data, output.response, output.error);
            queue.post(move || completion(response));
        });
    }

    /// Async form of [`request`](Self::request).
    ///
    /// Resolves with [`NetworkError::Unknown`] if the task is cancelled.
    pub async fn fetch<T>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
    ) -> NetworkResponse<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<NetworkResponse<T>>();
        self.request(url, method, parameters, headers, move |response| {
            let _ = tx.send(response);
        });
        rx.await
            .unwrap_or(NetworkResponse::Failure(NetworkError::Unknown))
    }

    /// Async form of [`request_raw`](Self::request_raw).
    ///
    /// Resolves with [`NetworkError::Unknown`] if the task is cancelled.
    pub async fn fetch_raw(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
    ) -> RawResponse {
        let (tx, rx) = oneshot::channel::<RawResponse>();
        self.request_raw(url, method, parameters, headers, move |response| {
            let _ = tx.send(response);
        });
        rx.await
            .unwrap_or_else(|_| RawResponse::failure(NetworkError::Unknown))
    }

    /// Spawns the transport call and records it as the current task.
    fn dispatch<H>(&self, request: HttpRequest, on_complete: H)
    where
        H: FnOnce(TransportOutput) + Send + 'static,
    {
        let id = self.next_task_id.fetch_add(1, Ordering::Relaxed);
        let method = request.method;
        let url = request.url.clone();
        let future = self.transport.dispatch(request);

        // held across the spawn so a completion never observes the old task
        let mut current = self.lock_current_task();

        let handle = self.runtime.spawn(
            async move {
                let output = future.await;
                if let Some(response) = &output.response {
                    Span::current().record("http.status_code", response.status);
                }
                debug!(task_id = id, "request completed");
                on_complete(output);
            }
            .instrument(Span::current()),
        );

        debug!(task_id = id, "request dispatched");
        *current = Some(DataTask::new(id, method, url, handle.abort_handle()));
    }

    fn lock_current_task(&self) -> MutexGuard<'_, Option<DataTask>> {
        self.current_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Requestable for RequestManager {
    fn request<T, F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(NetworkResponse<T>) + Send + 'static,
    {
        RequestManager::request(self, url, method, parameters, headers, completion);
    }

    fn request_raw<F>(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
        completion: F,
    ) where
        F: FnOnce(RawResponse) + Send + 'static,
    {
        RequestManager::request_raw(self, url, method, parameters, headers, completion);
    }

    fn build_request(
        &self,
        url: &Url,
        method: HttpMethod,
        parameters: Option<&Parameters>,
        headers: Option<&Headers>,
    ) -> Option<HttpRequest> {
        RequestManager::build_request(self, url, method, parameters, headers)
    }
}
