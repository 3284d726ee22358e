//! Kiosk analytics: event buffering and per-demo summaries.
//!
//! Events are appended to a local list with a timestamp; nothing ships them
//! anywhere. `summarize` mirrors the booth operator's end-of-day tally.

use anyhow::Result;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use super::local::{LocalStore, get_list, push_list};
use crate::constants::ANALYTICS_KEY;
use crate::record::generate_timestamp;

/// Per-demo event counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoStats {
    pub views: u32,
    pub feedback: u32,
}

/// Appends an event to the analytics buffer.
///
/// `extra` fields are merged into the event object; an object value adds
/// its fields, anything else adds none.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub fn log_event(
    store: &dyn LocalStore,
    event: &str,
    demo_id: Option<&str>,
    extra: Value,
) -> Result<()> {
    let mut entry = match extra {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    entry.insert("event".to_string(), json!(event));
    if let Some(id) = demo_id {
        entry.insert("demoId".to_string(), json!(id));
    }
    entry.insert("timestamp".to_string(), json!(generate_timestamp()));

    push_list(store, ANALYTICS_KEY, Value::Object(entry))
}

/// Tallies buffered events per demo: opens count as views, submissions as
/// feedback. Events without a `demoId` are ignored.
///
/// # Errors
///
/// Returns an error if the local store cannot be read.
pub fn summarize(store: &dyn LocalStore) -> Result<BTreeMap<String, DemoStats>> {
    let mut stats: BTreeMap<String, DemoStats> = BTreeMap::new();

    for event in get_list(store, ANALYTICS_KEY)? {
        let Some(demo_id) = event.get("demoId").and_then(|v| v.as_str()) else {
            continue;
        };
        let entry = stats.entry(demo_id.to_string()).or_default();
        match event.get("event").and_then(|v| v.as_str()) {
            Some("demo_opened") => entry.views += 1,
            Some("feedback_submitted") => entry.feedback += 1,
            _ => {},
        }
    }

    Ok(stats)
}
