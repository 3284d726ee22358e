//! CSV serialization of feedback records.
//!
//! The default schema takes the column set from the first record only:
//! later records' extra fields are dropped and missing fields emit empty
//! cells. That lossy behavior is part of the export contract and is covered
//! by tests; the `union` schema is the opt-in alternative that keeps every
//! observed column.
//!
//! Quoting is deliberately minimal: a string value containing a comma is
//! wrapped in double quotes, and embedded quotes or newlines are left
//! untouched. This is not a full CSV writer.

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;

use crate::record::FeedbackRecord;

/// How export derives the CSV column set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CsvSchema {
    /// Columns are the keys of the first record, in order. Fields that only
    /// appear in later records are silently dropped.
    #[default]
    First,
    /// Columns are the union of all records' keys: the first record's keys
    /// in order, then remaining keys in first-seen order.
    Union,
}

/// Serialize records to CSV under the given schema.
///
/// Returns `None` when there are no records; the caller decides how to
/// surface the empty case (the HTTP handler sends a plain-text notice).
pub fn to_csv(records: &[FeedbackRecord], schema: CsvSchema) -> Option<String> {
    let first = records.first()?;

    let mut headers: Vec<String> = first.keys().cloned().collect();
    if schema == CsvSchema::Union {
        for record in &records[1..] {
            for key in record.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));

    for record in records {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| format_cell(record.get(h)))
            .collect();
        lines.push(cells.join(","));
    }

    Some(lines.join("\n"))
}

/// Render one cell. Missing and falsy values become the empty string;
/// strings containing a comma are quoted, everything else is emitted as-is.
fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        },
        Some(Value::String(s)) => {
            if s.is_empty() {
                String::new()
            } else if s.contains(',') {
                format!("\"{s}\"")
            } else {
                s.clone()
            }
        },
        // Nested values are not produced by the kiosk form; serialize them
        // compactly rather than failing the whole export.
        Some(other) => other.to_string(),
    }
}
