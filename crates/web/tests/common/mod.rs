#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::Response;
use axum::routing::{post, put};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use registry_client::RegistryApi;
use registry_core::credential::ApiCredential;
use registry_core::error::CoreError;
use registry_web::auth::{Authenticator, SessionUser};
use registry_web::config::{ServerConfig, SessionConfig};
use registry_web::router::build_app_router;
use registry_web::state::AppState;

/// Password accepted by [`FakeAuthenticator`] for every user.
pub const TEST_PASSWORD: &str = "secret";

/// Accepts any non-empty username with [`TEST_PASSWORD`].
pub struct FakeAuthenticator;

impl Authenticator for FakeAuthenticator {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<SessionUser>, CoreError> {
        if username.is_empty() || password != TEST_PASSWORD {
            return Ok(None);
        }
        Ok(Some(SessionUser {
            user: username.to_string(),
            credential: ApiCredential::basic(username, password),
        }))
    }
}

/// Build a test `ServerConfig` pointing at `registry_api_url` (or deriving
/// the registry base from the request host when `None`).
pub fn test_config(registry_api_url: Option<String>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        registry_api_url,
        registry_api_timeout_secs: 5,
        trust_proxy_headers: false,
        session: SessionConfig {
            secure_cookie: false,
            idle_mins: 60,
        },
        users: String::new(),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(registry_api_url: Option<String>) -> Router {
    build_test_app_with(test_config(registry_api_url))
}

/// Build the full application router from an explicit config.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let registry = RegistryApi::new(Duration::from_secs(config.registry_api_timeout_secs))
        .expect("client should build");

    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
        authenticator: Arc::new(FakeAuthenticator),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, uri: &str, body: String, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

/// URL-encode form fields.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` pair of the session cookie set on a response.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// The `data-view` marker of a rendered page.
pub fn view_name(html: &str) -> Option<&str> {
    let start = html.find("data-view=\"")? + "data-view=\"".len();
    let end = html[start..].find('"')? + start;
    Some(&html[start..end])
}

/// Log `username` in and return the session cookie.
pub async fn login(app: &Router, username: &str) -> String {
    let body = form_body(&[("username", username), ("password", TEST_PASSWORD)]);
    let response = post_form(app, "/login", body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    session_cookie(&response).expect("login must set a session cookie")
}

// ---------------------------------------------------------------------------
// Fake instance registry API
// ---------------------------------------------------------------------------

/// A call received by the fake registry.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeRegistryState {
    reply: Value,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Registry API stub served on an ephemeral local port.
pub struct FakeRegistry {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// `127.0.0.1:<port>`, usable as a Host header.
    pub authority: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeRegistry {
    /// Serve a registry that answers every call with `reply` as its JSON body.
    pub async fn start(reply: Value) -> Self {
        Self::start_delayed(reply, Duration::ZERO).await
    }

    /// Serve a registry that waits `delay` before answering each call.
    pub async fn start_delayed(reply: Value, delay: Duration) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/service/instances", post(record))
            .route("/service/instances/{id}", put(record))
            .with_state(FakeRegistryState {
                reply,
                delay,
                calls: Arc::clone(&calls),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            authority: addr.to_string(),
            calls,
        }
    }

    /// Serve a registry whose reply is the JSON document wrapped in a JSON string.
    pub async fn start_string_encoded(reply: Value) -> Self {
        Self::start(Value::String(reply.to_string())).await
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<FakeRegistryState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    state.calls.lock().unwrap().push(RecordedCall {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    Json(state.reply.clone())
}
