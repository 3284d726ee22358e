//! The feedback submit flow.
//!
//! Attempts delivery to the remote spreadsheet endpoint; any network error
//! or non-2xx response drops the submission into the local fallback list
//! instead. Both outcomes mark the video as fed back and land the kiosk in
//! the thank-you state, so delivery problems never surface to the visitor.
//! There is no retry, no queued delivery, and no reconciliation between the
//! fallback list and the remote sheet.

use anyhow::{Result, bail};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use super::analytics;
use super::local::{LocalStore, push_list};
use super::session::Session;
use crate::constants::{COMMENT_CHAR_LIMIT, FALLBACK_KEY};
use crate::record::build_record;

/// One visitor submission, as gathered from the kiosk form.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub video_id: String,
    pub video_title: String,
    /// `"up"` or `"down"`. Required; the flow refuses to submit without it.
    pub sentiment: Option<String>,
    pub comment: Option<String>,
    pub email: Option<String>,
}

/// Where a submission ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote endpoint confirmed delivery with a 2xx response.
    Remote,
    /// Delivery could not be confirmed; the submission was appended to the
    /// local fallback list.
    Fallback,
}

/// Posts submissions to the spreadsheet endpoint.
pub struct SubmitFlow {
    client: reqwest::Client,
    endpoint: String,
}

impl SubmitFlow {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Runs one submission end to end.
    ///
    /// Validates the sentiment locally, attempts remote delivery, falls
    /// back to local persistence when delivery cannot be confirmed, marks
    /// the video fed back, and logs the analytics event. The returned
    /// outcome says where the data went; either way the session reports the
    /// thank-you state afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if no sentiment was chosen (before any network
    /// call) or if local persistence itself fails.
    pub async fn submit(
        &self,
        session: &mut Session,
        store: &dyn LocalStore,
        submission: Submission,
    ) -> Result<SubmitOutcome> {
        let Some(sentiment) = submission.sentiment.clone() else {
            bail!("Please select thumbs up or down before submitting");
        };

        let payload = payload_for(&submission, &sentiment);

        let delivered = match self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(status = %resp.status(), "Spreadsheet endpoint rejected submission");
                false
            },
            Err(e) => {
                warn!(error = %e, "Spreadsheet endpoint unreachable");
                false
            },
        };

        let outcome = if delivered {
            info!(video_id = %submission.video_id, "Feedback delivered to spreadsheet");
            SubmitOutcome::Remote
        } else {
            let record = build_record(Value::Object(payload.clone()));
            push_list(store, FALLBACK_KEY, Value::Object(record))?;
            info!(video_id = %submission.video_id, "Feedback saved to local fallback");
            SubmitOutcome::Fallback
        };

        session.mark_submitted(&submission.video_id, store)?;
        analytics::log_event(
            store,
            "feedback_submitted",
            Some(&submission.video_id),
            json!({"sentiment": sentiment}),
        )?;

        Ok(outcome)
    }
}

/// Builds the JSON payload for a submission, truncating the comment to the
/// kiosk's character limit.
fn payload_for(submission: &Submission, sentiment: &str) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("videoId".to_string(), json!(submission.video_id));
    payload.insert("videoTitle".to_string(), json!(submission.video_title));
    payload.insert("sentiment".to_string(), json!(sentiment));
    if let Some(comment) = &submission.comment {
        let truncated: String = comment.chars().take(COMMENT_CHAR_LIMIT).collect();
        payload.insert("comment".to_string(), json!(truncated));
    }
    if let Some(email) = &submission.email {
        payload.insert("email".to_string(), json!(email));
    }
    payload
}
