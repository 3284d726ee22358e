//! Client submit-flow integration tests.
//!
//! Drives the kiosk submit flow against stub spreadsheet endpoints: one
//! that accepts, one that rejects, and one that is unreachable. The flow
//! must land in the thank-you state in every delivered-or-fallback case and
//! must keep the two stores' divergence invisible to the visitor.

use axum::{Router, http::StatusCode, routing::post};
use kiosk::client::{
    FileStore, LocalStore, MemoryStore, Session, SubmitFlow, SubmitOutcome, Submission, ViewState,
};
use kiosk::constants::FALLBACK_KEY;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Spawn a stub endpoint answering every POST with the given status.
async fn stub_endpoint(status: StatusCode) -> String {
    let app = Router::new().route("/", post(move || async move { status }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// An address nothing listens on: bind, read the port, drop the listener.
async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

fn submission(video_id: &str, sentiment: Option<&str>) -> Submission {
    Submission {
        video_id: video_id.to_string(),
        video_title: "Demo".to_string(),
        sentiment: sentiment.map(str::to_string),
        comment: Some("great, thanks".to_string()),
        email: None,
    }
}

fn fallback_list(store: &dyn LocalStore) -> Vec<Value> {
    match store.get(FALLBACK_KEY).unwrap() {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[tokio::test]
async fn test_successful_delivery_marks_submitted() {
    let endpoint = stub_endpoint(StatusCode::OK).await;
    let store = MemoryStore::new();
    let mut session = Session::load(&store).unwrap();
    let flow = SubmitFlow::new(endpoint);

    let outcome = flow
        .submit(&mut session, &store, submission("demo-1", Some("up")))
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Remote);
    assert!(session.has_submitted("demo-1"));
    assert_eq!(session.view("demo-1"), ViewState::ThankYou);
    assert!(fallback_list(&store).is_empty());
}

#[tokio::test]
async fn test_server_rejection_falls_back_locally() {
    // Redesigned contract: a confirmed non-2xx response is a failure, not
    // an assumed success.
    let endpoint = stub_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await;
    let store = MemoryStore::new();
    let mut session = Session::load(&store).unwrap();
    let flow = SubmitFlow::new(endpoint);

    let outcome = flow
        .submit(&mut session, &store, submission("demo-1", Some("down")))
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Fallback);
    assert_eq!(session.view("demo-1"), ViewState::ThankYou);

    let saved = fallback_list(&store);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["videoId"], "demo-1");
    assert_eq!(saved[0]["sentiment"], "down");
}

#[tokio::test]
async fn test_network_failure_falls_back_with_generated_fields() {
    let endpoint = unreachable_endpoint().await;
    let store = MemoryStore::new();
    let mut session = Session::load(&store).unwrap();
    let flow = SubmitFlow::new(endpoint);

    let outcome = flow
        .submit(&mut session, &store, submission("demo-1", Some("up")))
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Fallback);
    assert_eq!(session.view("demo-1"), ViewState::ThankYou);

    let saved = fallback_list(&store);
    assert_eq!(saved.len(), 1);
    let id = saved[0]["id"].as_str().expect("fallback record has an id");
    assert!(id.starts_with("feedback-"));
    assert!(saved[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_missing_sentiment_fails_before_any_side_effect() {
    let endpoint = unreachable_endpoint().await;
    let store = MemoryStore::new();
    let mut session = Session::load(&store).unwrap();
    let flow = SubmitFlow::new(endpoint);

    let result = flow
        .submit(&mut session, &store, submission("demo-1", None))
        .await;

    assert!(result.is_err());
    assert!(!session.has_submitted("demo-1"));
    assert!(fallback_list(&store).is_empty());
}

#[tokio::test]
async fn test_submitted_state_is_monotone_across_reloads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("local.json");
    let endpoint = stub_endpoint(StatusCode::OK).await;

    {
        let store = FileStore::new(&path);
        let mut session = Session::load(&store).unwrap();
        let flow = SubmitFlow::new(endpoint);
        flow.submit(&mut session, &store, submission("demo-1", Some("up")))
            .await
            .unwrap();
    }

    // A fresh session over the same local data opens straight into the
    // thank-you state.
    let store = FileStore::new(&path);
    let mut session = Session::load(&store).unwrap();
    assert_eq!(session.open("demo-1"), ViewState::ThankYou);
    assert_eq!(session.open("demo-2"), ViewState::Form);
}

#[tokio::test]
async fn test_fallback_and_success_paths_look_identical_to_visitor() {
    let store = MemoryStore::new();
    let mut session = Session::load(&store).unwrap();

    let ok = SubmitFlow::new(stub_endpoint(StatusCode::OK).await);
    let dead = SubmitFlow::new(unreachable_endpoint().await);

    ok.submit(&mut session, &store, submission("demo-1", Some("up")))
        .await
        .unwrap();
    dead.submit(&mut session, &store, submission("demo-2", Some("up")))
        .await
        .unwrap();

    // Different outcomes internally, same terminal view state.
    assert_eq!(session.view("demo-1"), ViewState::ThankYou);
    assert_eq!(session.view("demo-2"), ViewState::ThankYou);
}
