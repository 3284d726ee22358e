//! Kiosk session state.
//!
//! Replaces the web page's module-level `currentVideo` and submitted-set
//! globals with an explicit value the caller threads through the flow. The
//! submitted-set is loaded from and saved to a [`LocalStore`] and only ever
//! grows: once a video is marked fed-back it stays that way for the life of
//! the local data.

use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeSet;

use super::local::LocalStore;
use crate::constants::SUBMITTED_KEY;

/// What the kiosk shows for a given video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No feedback yet: show the form.
    Form,
    /// Already fed back: show the thank-you state.
    ThankYou,
}

/// Per-kiosk view state: the video currently open and the set of video ids
/// that already received feedback.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<String>,
    submitted: BTreeSet<String>,
}

impl Session {
    /// Loads the submitted-set from the local store.
    ///
    /// Unreadable or non-array stored values start an empty set rather than
    /// failing the kiosk.
    ///
    /// # Errors
    ///
    /// Returns an error if the store itself cannot be read.
    pub fn load(store: &dyn LocalStore) -> Result<Self> {
        let submitted = match store.get(SUBMITTED_KEY)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(_) | None => BTreeSet::new(),
        };
        Ok(Self {
            current: None,
            submitted,
        })
    }

    /// Opens a video, returning what the kiosk should display for it.
    pub fn open(&mut self, video_id: &str) -> ViewState {
        self.current = Some(video_id.to_string());
        self.view(video_id)
    }

    /// The id of the currently open video, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Closes the currently open video.
    pub fn close(&mut self) {
        self.current = None;
    }

    /// Whether feedback was already submitted for `video_id`.
    pub fn has_submitted(&self, video_id: &str) -> bool {
        self.submitted.contains(video_id)
    }

    /// The view the kiosk shows for `video_id`.
    pub fn view(&self, video_id: &str) -> ViewState {
        if self.has_submitted(video_id) {
            ViewState::ThankYou
        } else {
            ViewState::Form
        }
    }

    /// Marks `video_id` as fed back and persists the set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails; the in-memory set is
    /// updated regardless so the current session stays consistent.
    pub fn mark_submitted(&mut self, video_id: &str, store: &dyn LocalStore) -> Result<()> {
        self.submitted.insert(video_id.to_string());
        let ids: Vec<Value> = self
            .submitted
            .iter()
            .map(|id| Value::String(id.clone()))
            .collect();
        store.set(SUBMITTED_KEY, &Value::Array(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_fresh_session_shows_form() {
        let store = MemoryStore::new();
        let mut session = Session::load(&store).unwrap();
        assert_eq!(session.open("demo-1"), ViewState::Form);
        assert_eq!(session.current(), Some("demo-1"));
    }

    #[test]
    fn test_mark_submitted_flips_view() {
        let store = MemoryStore::new();
        let mut session = Session::load(&store).unwrap();

        session.mark_submitted("demo-1", &store).unwrap();

        assert_eq!(session.view("demo-1"), ViewState::ThankYou);
        assert_eq!(session.view("demo-2"), ViewState::Form);
    }

    #[test]
    fn test_submitted_set_survives_reload() {
        let store = MemoryStore::new();
        let mut session = Session::load(&store).unwrap();
        session.mark_submitted("demo-1", &store).unwrap();

        let reloaded = Session::load(&store).unwrap();
        assert!(reloaded.has_submitted("demo-1"));
        assert_eq!(reloaded.view("demo-1"), ViewState::ThankYou);
    }

    #[test]
    fn test_corrupt_stored_set_starts_empty() {
        let store = MemoryStore::new();
        store.set(SUBMITTED_KEY, &json!("not an array")).unwrap();

        let session = Session::load(&store).unwrap();
        assert!(!session.has_submitted("demo-1"));
    }

    #[test]
    fn test_close_clears_current() {
        let store = MemoryStore::new();
        let mut session = Session::load(&store).unwrap();
        session.open("demo-1");
        session.close();
        assert_eq!(session.current(), None);
    }
}
