//! Feedback record construction.
//!
//! A [`FeedbackRecord`] is a flat JSON object: whatever fields the client
//! submitted, plus a generated `id` and `timestamp`. Records are immutable
//! after creation; nothing in the system updates or deletes them.

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::ID_PREFIX;

/// A stored feedback submission: arbitrary client fields plus `id` and
/// `timestamp`.
pub type FeedbackRecord = Map<String, Value>;

/// Generate a globally unique record id: `feedback-<epoch-millis>-<suffix>`.
///
/// The suffix is 9 hex characters of a v4 UUID, which keeps the id matching
/// the `feedback-<digits>-<alnum>` shape consumers rely on.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("{ID_PREFIX}-{millis}-{suffix}")
}

/// Current time as an ISO-8601 string, e.g. `2026-02-01T10:30:00.000Z`.
pub fn generate_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Build a [`FeedbackRecord`] from a parsed request body.
///
/// Object bodies contribute their fields in order; any other JSON value
/// contributes nothing (mirroring object-spread over a non-object). The
/// generated `timestamp` and `id` are written last and win over
/// client-supplied fields of the same name.
pub fn build_record(body: Value) -> FeedbackRecord {
    let mut record = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    record.insert("timestamp".to_string(), Value::String(generate_timestamp()));
    record.insert("id".to_string(), Value::String(generate_id()));
    record
}
