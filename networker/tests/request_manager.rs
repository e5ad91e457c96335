//! End-to-end request manager tests against in-memory transports.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{FakeTransport, MockModel, MOCK_MODEL_JSON};
use networker::{
    CompletionQueue, Headers, HttpMethod, NetworkError, NetworkResponse, ParamValue, Parameters,
    RequestManager,
};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use url::Url;

fn url() -> Url {
    Url::parse("https://mock/url.com").unwrap()
}

fn manager(transport: &FakeTransport) -> RequestManager {
    RequestManager::builder()
        .transport(transport.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_typed_request_decodes_model() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = manager(&transport);

    let (tx, rx) = oneshot::channel();
    manager.request(&url(), HttpMethod::Get, None, None, move |response: NetworkResponse<MockModel>| {
        let _ = tx.send(response);
    });

    let model = rx.await.unwrap().into_result().unwrap();
    assert_eq!(model.id, "123");
    assert_eq!(model.name, "Austin");
    assert_eq!(transport.dispatch_count(), 1);
}

#[tokio::test]
async fn test_build_failure_never_dispatches() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = manager(&transport);
    let parameters = Parameters::from([("bogus".to_string(), ParamValue::Float(f64::INFINITY))]);

    let response = manager
        .fetch::<MockModel>(&url(), HttpMethod::Get, Some(&parameters), None)
        .await;

    assert_eq!(response, NetworkResponse::Failure(NetworkError::BadRequest));
    assert_eq!(transport.dispatch_count(), 0);
    assert!(manager.current_task().is_none());
}

#[tokio::test]
async fn test_dispatched_request_carries_headers_and_body() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = manager(&transport);
    let headers = Headers::from([("APIKey".to_string(), "key-to-the-api".to_string())]);
    let parameters = Parameters::from([("page".to_string(), ParamValue::from(2))]);

    let _ = manager
        .fetch::<MockModel>(&url(), HttpMethod::Post, Some(&parameters), Some(&headers))
        .await;

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].header("APIKey"), Some("key-to-the-api"));
    assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    assert_eq!(sent[0].timeout, Duration::from_secs(5));

    let body: serde_json::Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["page"], 2);
}

#[tokio::test]
async fn test_transport_error_is_unknown() {
    let transport = FakeTransport::fail("connection reset");
    let manager = manager(&transport);

    let response = manager
        .fetch::<MockModel>(&url(), HttpMethod::Get, None, None)
        .await;
    assert_eq!(response, NetworkResponse::Failure(NetworkError::Unknown));
}

#[tokio::test]
async fn test_missing_response_is_no_response() {
    let transport = FakeTransport::empty();
    let manager = manager(&transport);

    let response = manager
        .fetch::<MockModel>(&url(), HttpMethod::Get, None, None)
        .await;
    assert_eq!(response, NetworkResponse::Failure(NetworkError::NoResponse));
}

#[tokio::test]
async fn test_status_wins_over_body() {
    let transport = FakeTransport::respond(500, Some("<html>oops</html>"));
    let manager = manager(&transport);

    let response = manager
        .fetch::<MockModel>(&url(), HttpMethod::Get, None, None)
        .await;
    assert_eq!(response, NetworkResponse::Failure(NetworkError::ServerError));
}

#[tokio::test]
async fn test_raw_path_ignores_transport_error_when_response_present() {
    let transport = FakeTransport::new(|request| networker::TransportOutput {
        data: None,
        response: Some(networker::HttpResponse::new(request.url.clone(), 200)),
        error: Some(networker::TransportError::Other("body stream reset".into())),
    });
    let manager = manager(&transport);

    let raw = manager.fetch_raw(&url(), HttpMethod::Get, None, None).await;
    assert!(raw.error.is_none());
    assert_eq!(raw.response.map(|r| r.status), Some(200));

    // the typed path treats the same output as a transport failure
    let typed = manager
        .fetch::<MockModel>(&url(), HttpMethod::Get, None, None)
        .await;
    assert_eq!(typed, NetworkResponse::Failure(NetworkError::Unknown));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_completions_never_run_concurrently() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = manager(&transport);

    let active = Arc::new(AtomicUsize::new(0));
    let max_active = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel();

    const CALLS: usize = 32;
    for _ in 0..CALLS {
        let active = Arc::clone(&active);
        let max_active = Arc::clone(&max_active);
        let tx = tx.clone();
        manager.request(&url(), HttpMethod::Get, None, None, move |response: NetworkResponse<MockModel>| {
            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
            max_active.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(2));
            active.fetch_sub(1, Ordering::SeqCst);
            let _ = tx.send(response.is_success());
        });
    }
    drop(tx);

    let mut delivered = 0;
    while let Some(success) = rx.recv().await {
        assert!(success);
        delivered += 1;
    }

    assert_eq!(delivered, CALLS);
    assert_eq!(max_active.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_managers_can_share_a_completion_queue() {
    let queue = CompletionQueue::spawn(&Handle::current());
    let first = RequestManager::builder()
        .transport(FakeTransport::respond(200, Some(MOCK_MODEL_JSON)))
        .completion_queue(queue.clone())
        .build()
        .unwrap();
    let second = RequestManager::builder()
        .transport(FakeTransport::respond(401, None))
        .completion_queue(queue)
        .build()
        .unwrap();

    let a = first.fetch::<MockModel>(&url(), HttpMethod::Get, None, None).await;
    let b = second.fetch::<MockModel>(&url(), HttpMethod::Get, None, None).await;

    assert!(a.is_success());
    assert_eq!(b, NetworkResponse::Failure(NetworkError::Unauthorized));
}

#[tokio::test]
async fn test_current_task_tracks_latest_call() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = manager(&transport);

    let _ = manager.fetch_raw(&url(), HttpMethod::Get, None, None).await;
    let first = manager.current_task().unwrap();

    let _ = manager.fetch_raw(&url(), HttpMethod::Put, None, None).await;
    let second = manager.current_task().unwrap();

    assert!(second.id() > first.id());
    assert_eq!(second.method(), HttpMethod::Put);
}

#[tokio::test]
async fn test_current_task_is_visible_inside_completion() {
    let transport = FakeTransport::respond(200, Some(MOCK_MODEL_JSON));
    let manager = Arc::new(manager(&transport));

    let (tx, rx) = oneshot::channel();
    let inner = Arc::clone(&manager);
    manager.request_raw(&url(), HttpMethod::Get, None, None, move |_| {
        let _ = tx.send(inner.current_task().is_some());
    });

    assert!(rx.await.unwrap());
}
