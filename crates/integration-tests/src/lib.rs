//! Integration tests for Fieldhand.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fieldhand-integration-tests
//! ```
//!
//! The tests run against [`FakeConnector`], a local stand-in for the
//! BaseLinker connector endpoint. It binds an ephemeral port, answers each
//! POST from a scripted response queue, and records every call it sees, so
//! tests can assert on the exact wire traffic without real credentials.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use fieldhand_baselinker::Config;

/// Token the fake accepts; long and mixed enough to pass secret validation
/// if a test routes it through the environment.
pub const TEST_TOKEN: &str = "kU7pQn2wXr9sLb4vTd8cZf3hJm6gYa1e";

/// One recorded connector call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Value of the `X-BLToken` header, when present.
    pub token: Option<String>,
    /// The `method` form field.
    pub method: String,
    /// The `parameters` form field, decoded from its JSON string.
    pub parameters: Value,
}

/// Scripted reply for one connector call.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// 200 with this JSON envelope.
    Json(Value),
    /// Bare HTTP failure with a plain-text body.
    Http {
        status: u16,
        retry_after: Option<u64>,
        body: String,
    },
}

#[derive(Clone, Default)]
struct ConnectorState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<Scripted>>>,
}

#[derive(Deserialize)]
struct ConnectorForm {
    method: String,
    parameters: String,
}

async fn connector(
    State(state): State<ConnectorState>,
    headers: HeaderMap,
    Form(form): Form<ConnectorForm>,
) -> Response {
    let token = headers
        .get("X-BLToken")
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let parameters: Value = serde_json::from_str(&form.parameters).unwrap_or(Value::Null);

    state.calls.lock().expect("calls lock").push(RecordedCall {
        token,
        method: form.method,
        parameters,
    });

    let scripted = state
        .responses
        .lock()
        .expect("responses lock")
        .pop_front();

    match scripted {
        Some(Scripted::Json(body)) => Json(body).into_response(),
        Some(Scripted::Http {
            status,
            retry_after,
            body,
        }) => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let mut response = (status, body).into_response();
            if let Some(secs) = retry_after {
                response
                    .headers_mut()
                    .insert("Retry-After", HeaderValue::from(secs));
            }
            response
        }
        // Running off the end of the script is a test bug; answer with a
        // vendor error that names it.
        None => Json(json!({
            "status": "ERROR",
            "error_code": "ERROR_UNSCRIPTED",
            "error_message": "No scripted response left",
        }))
        .into_response(),
    }
}

/// Local stand-in for the BaseLinker connector endpoint.
pub struct FakeConnector {
    addr: SocketAddr,
    state: ConnectorState,
    handle: JoinHandle<()>,
}

impl FakeConnector {
    /// Bind an ephemeral local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot bind; tests cannot proceed without it.
    pub async fn start() -> Self {
        let state = ConnectorState::default();
        let app = Router::new()
            .route("/connector.php", post(connector))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test connector");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Connector endpoint URL.
    ///
    /// # Panics
    ///
    /// Panics when the bound address does not form a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/connector.php", self.addr)).expect("valid connector url")
    }

    /// Client configuration pointing at this connector.
    #[must_use]
    pub fn config(&self) -> Config {
        Config::new(SecretString::from(TEST_TOKEN), self.url())
    }

    /// Queue the next scripted reply.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    pub fn push_response(&self, scripted: Scripted) {
        self.state
            .responses
            .lock()
            .expect("responses lock")
            .push_back(scripted);
    }

    /// Queue a 200 `SUCCESS` envelope carrying the given payload fields.
    pub fn push_success(&self, payload: Value) {
        let mut body = json!({ "status": "SUCCESS" });
        if let (Some(envelope), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
            for (key, value) in extra {
                envelope.insert(key.clone(), value.clone());
            }
        }
        self.push_response(Scripted::Json(body));
    }

    /// Queue a vendor `ERROR` envelope.
    pub fn push_vendor_error(&self, code: &str, message: &str) {
        self.push_response(Scripted::Json(json!({
            "status": "ERROR",
            "error_code": code,
            "error_message": message,
        })));
    }

    /// Queue a bare HTTP failure.
    pub fn push_http(&self, status: u16, retry_after: Option<u64>, body: &str) {
        self.push_response(Scripted::Http {
            status,
            retry_after,
            body: body.to_owned(),
        });
    }

    /// All calls recorded so far, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().expect("calls lock").clone()
    }
}

impl Drop for FakeConnector {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
