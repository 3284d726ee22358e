//! Submit one piece of feedback from the terminal.

use anyhow::Result;
use serde_json::json;

use crate::client::{FileStore, Session, SubmitFlow, SubmitOutcome, Submission, ViewState, analytics};
use crate::config::Config;
use crate::paths::get_local_store_path;

/// Run the client submit flow once.
///
/// Mirrors what the kiosk page does on form submit: refuse a second
/// submission for the same video, attempt remote delivery, and fall back to
/// the local list when the endpoint cannot confirm it.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    config: &Config,
    video_id: String,
    video_title: String,
    sentiment: Option<String>,
    comment: Option<String>,
    email: Option<String>,
    endpoint_override: Option<String>,
) -> Result<()> {
    let store = FileStore::new(get_local_store_path()?);
    let mut session = Session::load(&store)?;

    let view = session.open(&video_id);
    analytics::log_event(&store, "demo_opened", Some(&video_id), json!({}))?;

    if view == ViewState::ThankYou {
        println!("Feedback for '{video_id}' was already submitted. Thanks again!");
        return Ok(());
    }

    // No configured endpoint behaves like an unreachable one: the flow
    // lands every submission in the local fallback list.
    let endpoint = endpoint_override
        .or_else(|| config.sheet.endpoint.clone())
        .unwrap_or_default();

    let flow = SubmitFlow::new(endpoint);
    let submission = Submission {
        video_id,
        video_title,
        sentiment,
        comment,
        email,
    };

    match flow.submit(&mut session, &store, submission).await? {
        SubmitOutcome::Remote => println!("Thanks! Feedback delivered."),
        SubmitOutcome::Fallback => {
            println!("Thanks! Feedback saved locally (endpoint unreachable).");
        },
    }

    Ok(())
}
