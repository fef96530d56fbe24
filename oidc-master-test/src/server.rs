use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{any, get};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An `axum` router served on an ephemeral localhost port.
///
/// The server task is aborted when the `StubServer` is dropped.
pub struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Serve `router` on `127.0.0.1:0`.
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub listener");
        let addr = listener.local_addr().expect("stub listener has no address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self { addr, handle }
    }

    /// Serve `document` at `{prefix}/.well-known/openid-configuration`.
    ///
    /// `prefix` is a path such as `""` or `"/realms/dev"`.
    pub async fn discovery(prefix: &str, document: Value) -> Self {
        let path = format!("{prefix}/.well-known/openid-configuration");
        let router = Router::new().route(
            &path,
            get(move || {
                let document = document.clone();
                async move { axum::Json(document) }
            }),
        );
        Self::start(router).await
    }

    /// Answer every request on `path` with a fixed status and body.
    pub async fn fixed(path: &str, status: StatusCode, body: &'static str) -> Self {
        let router = Router::new().route(path, any(move || async move { (status, body) }));
        Self::start(router).await
    }

    /// Answer every request on any path with a JSON body, recording each request.
    pub async fn recording(status: StatusCode, response: Value) -> (Self, Recorder) {
        let recorder = Recorder::default();
        let state = (recorder.clone(), status, response);
        let router = Router::new()
            .fallback(record_handler)
            .with_state(Arc::new(state));
        (Self::start(router).await, recorder)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }
}

/// Base URL of a localhost port nothing listens on, for connection failures.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to reserve a port");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);
    format!("http://{addr}")
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A request captured by [`StubServer::recording`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Path and query, e.g. `/v1beta/models/m:generateContent`.
    pub uri: String,
    pub headers: HeaderMap,
    /// Body parsed as JSON, `Value::Null` when it is not JSON.
    pub body: Value,
}

/// Shared log of requests received by a recording stub.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("recorder poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.requests.lock().expect("recorder poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type RecordingState = Arc<(Recorder, StatusCode, Value)>;

async fn record_handler(
    State(state): State<RecordingState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, axum::Json<Value>) {
    let (recorder, status, response) = &*state;
    recorder
        .requests
        .lock()
        .expect("recorder poisoned")
        .push(RecordedRequest {
            uri: uri.to_string(),
            headers,
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
    (*status, axum::Json(response.clone()))
}
