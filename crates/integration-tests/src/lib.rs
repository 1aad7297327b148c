//! Integration test support for the Canteen cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p canteen-integration-tests
//! ```
//!
//! The tests talk to a mock order server bound to an ephemeral port on
//! `127.0.0.1`, so nothing outside the test process is needed.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use canteen_storefront::{Badge, CartDisplay, CartPage};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

// ============================================================================
// Mock order server
// ============================================================================

/// What the mock server answers to `POST /place_order`.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this status and JSON body.
    Json(StatusCode, Value),
    /// Respond 200 with a body that is not JSON.
    Garbage,
}

impl Reply {
    /// `{"success": true, "order_id": <id>}`.
    #[must_use]
    pub fn placed(order_id: Value) -> Self {
        Self::Json(
            StatusCode::OK,
            serde_json::json!({ "success": true, "order_id": order_id }),
        )
    }

    /// `{"success": false}`.
    #[must_use]
    pub fn declined() -> Self {
        Self::Json(StatusCode::OK, serde_json::json!({ "success": false }))
    }
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A running mock order server. Aborted on drop.
pub struct MockOrderServer {
    base_url: Url,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl MockOrderServer {
    /// Spawn a server that answers every order with `reply`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(reply: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/place_order", post(place_order))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock order server");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock server address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}/")).expect("Invalid mock server URL");
        Self {
            base_url,
            requests,
            handle,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request bodies received so far, in order.
    pub async fn requests(&self) -> Vec<Value> {
        self.requests.lock().await.clone()
    }
}

impl Drop for MockOrderServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn place_order(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.requests.lock().await.push(body);
    match state.reply {
        Reply::Json(status, body) => (status, Json(body)).into_response(),
        Reply::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
    }
}

/// Base URL of a port nothing is listening on.
///
/// # Panics
///
/// Panics if a probe listener cannot be bound.
pub async fn unreachable_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("Invalid probe URL")
}

// ============================================================================
// Page and storage fixtures
// ============================================================================

/// Page that records what the cart shows.
#[derive(Debug, Default)]
pub struct TestPage {
    name_field: Option<String>,
    badges: RefCell<Vec<Badge>>,
    displays: RefCell<Vec<CartDisplay>>,
    alerts: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
}

impl TestPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name_field(value: &str) -> Self {
        Self {
            name_field: Some(value.to_owned()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn last_badge(&self) -> Option<Badge> {
        self.badges.borrow().last().copied()
    }

    #[must_use]
    pub fn last_display(&self) -> Option<CartDisplay> {
        self.displays.borrow().last().cloned()
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl CartPage for TestPage {
    fn update_badge(&self, badge: Badge) {
        self.badges.borrow_mut().push(badge);
    }

    fn show_cart(&self, display: &CartDisplay) {
        self.displays.borrow_mut().push(display.clone());
    }

    fn customer_name(&self) -> Option<String> {
        self.name_field.clone()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_owned());
    }
}

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// A fresh, not yet created, directory under the system temp dir.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let n = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "canteen-it-{label}-{}-{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
