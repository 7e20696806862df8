//! Test helpers for integration tests.
//!
//! Provides MockService, a scripted HTTP stand-in for one backend service,
//! plus JSON fixtures and client constructors.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use msa_admin::config::{ApiConfig, Config};
use msa_admin::console::{ConsoleContext, ScriptedTerminal};
use msa_admin::models::AuthResponse;
use msa_admin::{ApiClient, I18n, SessionHolder, SessionScope, SessionStore};

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    /// Path plus query, as sent.
    pub fn target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(String, String), VecDeque<Reply>>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<MockState>>;

/// Scripted HTTP service on 127.0.0.1.
///
/// Replies are queued per method and path; the last queued reply repeats.
/// Unscripted requests get 404 with an empty body.
pub struct MockService {
    pub base: String,
    state: Shared,
}

impl MockService {
    /// Bind to an ephemeral port and start serving.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            state,
        }
    }

    /// Queue a JSON reply.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.push(method, path, Reply {
            status,
            body: Some(body),
        });
    }

    /// Queue a reply without a body.
    pub fn on_empty(&self, method: &str, path: &str, status: u16) {
        self.push(method, path, Reply { status, body: None });
    }

    fn push(&self, method: &str, path: &str, reply: Reply) {
        let mut state = self.state.lock().unwrap();
        state
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests received for a method and path.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Number of requests received for a method and path.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

async fn handle(State(state): State<Shared>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(Recorded {
            method: method.clone(),
            path: path.clone(),
            query,
            authorization,
            body: String::from_utf8_lossy(&bytes).to_string(),
        });
        state.routes.get_mut(&(method, path)).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    match reply {
        Some(Reply {
            status,
            body: Some(body),
        }) => (
            StatusCode::from_u16(status).unwrap(),
            axum::Json(body),
        )
            .into_response(),
        Some(Reply { status, body: None }) => Response::builder()
            .status(status)
            .body(Body::empty())
            .unwrap(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// The three services of one test.
pub struct Services {
    pub auth: MockService,
    pub member: MockService,
    pub board: MockService,
}

impl Services {
    pub async fn start() -> Self {
        Self {
            auth: MockService::start().await,
            member: MockService::start().await,
            board: MockService::start().await,
        }
    }

    /// Configuration pointing at the mocks.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api = ApiConfig {
            auth_base_url: self.auth.base.clone(),
            member_base_url: self.member.base.clone(),
            board_base_url: self.board.base.clone(),
            ..ApiConfig::default()
        };
        config.locale.language = "en".to_string();
        config.ui.timezone = "UTC".to_string();
        config
    }

    /// English client for the mocks.
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config().api, english()).unwrap()
    }

    /// Console context on a scripted terminal with in-memory sessions.
    pub fn console(&self, session: SessionHolder, input: &[&str]) -> ConsoleContext<ScriptedTerminal> {
        ConsoleContext::new(
            ScriptedTerminal::new(input.iter().copied()),
            self.api(),
            session,
            english(),
            Arc::new(self.config()),
        )
    }
}

pub fn english() -> Arc<I18n> {
    Arc::new(I18n::builtin("en").unwrap())
}

/// Sessions kept in memory only.
pub fn sessions() -> SessionHolder {
    SessionHolder::restore(SessionStore::in_memory())
}

/// Store a completed login in `holder`.
pub fn sign_in(holder: &mut SessionHolder, scope: SessionScope, token: &str, role: &str) {
    let auth: AuthResponse =
        serde_json::from_value(auth_json(token, "admin@example.com", role)).unwrap();
    assert!(holder.complete_login(scope, auth));
}

pub fn auth_json(token: &str, email: &str, role: &str) -> Value {
    json!({ "token": token, "email": email, "role": role })
}

pub fn member_json(id: &str, email: &str, status: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": "Kim",
        "status": status,
        "createdAt": "2024-03-01T09:00:00Z",
    })
}

pub fn identity_json(id: &str, email: &str, status: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "role": "USER",
        "status": status,
        "createdAt": "2024-03-01T09:00:00Z",
    })
}

pub fn board_json(id: &str, name: &str, visibility: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "visibility": visibility,
        "status": status,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-02T09:00:00Z",
    })
}

pub fn post_json(id: &str, board_id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "boardId": board_id,
        "authorEmail": "writer@example.com",
        "title": title,
        "content": format!("{title} body"),
        "status": status,
        "createdAt": "2024-03-03T09:00:00Z",
    })
}

pub fn page_json(content: Vec<Value>, page: u32, size: u32, total_elements: u64) -> Value {
    let total_pages = total_elements.div_ceil(u64::from(size));
    json!({
        "content": content,
        "page": page,
        "size": size,
        "totalElements": total_elements,
        "totalPages": total_pages,
    })
}
