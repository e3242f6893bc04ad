#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;
use reqwest::Url;
use serde_json::Value;
use tempfile::TempDir;

use treaty_ledger::{
    config::Config,
    state::AppState,
    storage::{USER_ROLE_KEY, USER_TOKEN_KEY},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("treaty_ledger=debug")
        .with_test_writer()
        .try_init();
});

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: Option<Value>,
}

/// A stand-in for the treaty backend.
///
/// Replies are queued per `METHOD path`; the last queued reply keeps being
/// served once the others are used up.
#[derive(Default)]
pub struct MockBackend {
    requests: Mutex<Vec<Recorded>>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
}

impl MockBackend {
    pub fn reply(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(method, path, status, Some(body));
    }

    pub fn reply_empty(&self, method: &str, path: &str, status: u16) {
        self.push(method, path, status, None);
    }

    fn push(&self, method: &str, path: &str, status: u16, body: Option<Value>) {
        let reply = Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        };
        self.replies
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` of every request, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    fn next_reply(&self, key: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

async fn handle(
    State(mock): State<Arc<MockBackend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    mock.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    let key = format!("{} {}", method, uri.path());
    match mock.next_reply(&key) {
        Some(Reply { status, body: Some(body) }) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response(),
        Some(Reply { status, body: None }) => status.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"no reply configured"}"#,
        )
            .into_response(),
    }
}

/// Serves `mock` on an ephemeral local port.
pub async fn spawn(mock: Arc<MockBackend>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(handle).with_state(mock);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A client wired to a running mock backend.
pub struct Harness {
    pub mock: Arc<MockBackend>,
    pub state: AppState,
    _storage_dir: TempDir,
}

impl Harness {
    pub async fn start() -> Self {
        Lazy::force(&TRACING);

        let mock = Arc::new(MockBackend::default());
        let addr = spawn(mock.clone()).await;
        let state = state_for(&format!("http://{}", addr));

        Self {
            mock,
            state: state.0,
            _storage_dir: state.1,
        }
    }

    /// Stores a session the way a successful login would.
    pub fn sign_in(&self, token: &str, role: &str) {
        self.state.storage.set_item(USER_TOKEN_KEY, token).unwrap();
        self.state.storage.set_item(USER_ROLE_KEY, role).unwrap();
    }

    pub fn sign_in_admin(&self) {
        self.sign_in("MOCK_ADMIN_TOKEN", "admin");
    }
}

/// Builds a state for `base_url` with storage in a fresh temporary directory.
pub fn state_for(base_url: &str) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::for_backend(Url::parse(base_url).unwrap());
    config.storage_path = Some(dir.path().join("local_storage.json"));
    (AppState::new(&config).unwrap(), dir)
}

/// A base URL nothing listens on.
pub async fn dead_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
