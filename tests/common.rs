//! Shared test host for integration tests.
//!
//! Binds the feedback API router on an ephemeral port backed by an
//! in-memory store and drives it with reqwest, so tests exercise the real
//! HTTP surface.

use std::sync::Arc;

use kiosk::export::CsvSchema;
use kiosk::server::{AppState, router};
use kiosk::store::FeedbackStore;
use tokio::net::TcpListener;

pub struct TestHost {
    base: String,
    pub client: reqwest::Client,
    /// Direct handle to the same store the server uses, for seeding and
    /// asserting on stored state.
    pub store: FeedbackStore,
}

impl TestHost {
    /// Start a host with the default (first-record) CSV schema.
    pub async fn start() -> Self {
        Self::start_with_schema(CsvSchema::First).await
    }

    pub async fn start_with_schema(csv_schema: CsvSchema) -> Self {
        let store = FeedbackStore::memory();
        let state = Arc::new(AppState {
            store: store.clone(),
            csv_schema,
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");

        tokio::spawn(async move {
            axum::serve(listener, router(state))
                .await
                .expect("Test server failed");
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST failed")
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("POST failed")
    }
}

/// Asserts an id matches `feedback-<digits>-<alnum>`.
pub fn assert_feedback_id(id: &str) {
    let parts: Vec<&str> = id.splitn(3, '-').collect();
    assert_eq!(parts.len(), 3, "unexpected id shape: {id}");
    assert_eq!(parts[0], "feedback");
    assert!(
        !parts[1].is_empty() && parts[1].bytes().all(|b| b.is_ascii_digit()),
        "unexpected id shape: {id}"
    );
    assert!(
        !parts[2].is_empty() && parts[2].bytes().all(|b| b.is_ascii_alphanumeric()),
        "unexpected id shape: {id}"
    );
}
