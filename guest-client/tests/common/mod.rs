//! Scripted backend shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use guest_client::core::error::ApiError;
use guest_client::core::service::Transport;
use guest_client::services::api::{ApiClient, HttpRequest, HttpResponse, Method};
use guest_client::services::session::{MemoryTokenStore, Session, SessionTokens};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const BASE: &str = "http://backend.test";

/// Outcome of `POST /auth/refresh`.
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    Issue(&'static str),
    Reject(u16),
    /// No response at all
    Offline,
}

/// In-memory backend.
///
/// Requests carrying a bearer other than the accepted one get 401.
/// Everything else is answered from routes keyed by `"METHOD url"`;
/// unknown routes answer 404. Offline routes fail without a response and
/// delayed routes wait before the token is checked.
pub struct ScriptedTransport {
    accepted_token: Mutex<String>,
    refresh: Mutex<RefreshBehavior>,
    refresh_delay: Duration,
    refresh_calls: AtomicUsize,
    routes: Mutex<HashMap<String, HttpResponse>>,
    offline: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(accepted_token: &str) -> Arc<Self> {
        Arc::new(Self {
            accepted_token: Mutex::new(accepted_token.to_string()),
            refresh: Mutex::new(RefreshBehavior::Issue("fresh")),
            refresh_delay: Duration::from_millis(50),
            refresh_calls: AtomicUsize::new(0),
            routes: Mutex::new(HashMap::new()),
            offline: Mutex::new(HashSet::new()),
            delays: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn on_refresh(&self, behavior: RefreshBehavior) {
        *self.refresh.lock() = behavior;
    }

    /// Route for an API path under [`BASE`].
    pub fn route(&self, method: Method, path: &str, response: HttpResponse) {
        self.route_url(method, &format!("{BASE}{path}"), response);
    }

    pub fn route_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.route(method, path, HttpResponse::json(status, &body));
    }

    pub fn route_url(&self, method: Method, url: &str, response: HttpResponse) {
        self.routes.lock().insert(format!("{method} {url}"), response);
    }

    /// Requests to `path` fail at the network layer.
    pub fn offline(&self, method: Method, path: &str) {
        self.offline.lock().insert(format!("{method} {BASE}{path}"));
    }

    pub fn delay(&self, method: Method, path: &str, delay: Duration) {
        self.delays.lock().insert(format!("{method} {BASE}{path}"), delay);
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Requests whose URL ends with `suffix`, refresh calls excluded.
    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.ends_with(suffix))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().push(request.clone());

        if request.url == format!("{BASE}/auth/refresh") {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.refresh_delay).await;
            let behavior = self.refresh.lock().clone();
            return match behavior {
                RefreshBehavior::Issue(token) => Ok(HttpResponse::json(200, &json!({ "access_token": token }))),
                RefreshBehavior::Reject(status) => {
                    Ok(HttpResponse::json(status, &json!({ "message": "invalid refresh token" })))
                }
                RefreshBehavior::Offline => Err(ApiError::network("connection refused")),
            };
        }

        let key = format!("{} {}", request.method, request.url);
        if self.offline.lock().contains(&key) {
            return Err(ApiError::network("connection refused"));
        }
        let delay = self.delays.lock().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(bearer) = &request.bearer {
            if *bearer != *self.accepted_token.lock() {
                return Ok(HttpResponse::json(401, &json!({ "message": "token expired" })));
            }
        }

        Ok(self
            .routes
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| HttpResponse::json(404, &json!({ "message": format!("no route for {key}") }))))
    }
}

pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub store: Arc<MemoryTokenStore>,
    pub client: ApiClient,
}

/// Client whose session holds `tokens`; the backend accepts `accepted_token`.
pub fn harness(tokens: SessionTokens, accepted_token: &str) -> Harness {
    let transport = ScriptedTransport::new(accepted_token);
    let store = Arc::new(MemoryTokenStore::with_tokens(tokens));
    let session = Arc::new(Session::load(store.clone()).expect("memory store never fails"));
    let client = ApiClient::with_transport(BASE, transport.clone(), session);
    Harness {
        transport,
        store,
        client,
    }
}

pub fn assignment_json(id: &str) -> Value {
    json!({
        "id": id,
        "code": "A-1",
        "purpose": "Проверка номера",
        "listing": {"id": "l1", "title": "Гостиница Волга"},
        "reporter": {"id": "u1", "username": "guest"},
        "status": {"id": 1, "slug": "offered", "name": "Предложено"},
        "created_at": "2025-03-01T10:00:00Z",
        "expires_at": "2025-03-02T10:00:00Z"
    })
}
