//! Shared constants for the kiosk crate.

/// Default port for `kiosk serve`.
pub const DEFAULT_PORT: u16 = 8787;

/// Maximum comment length accepted by the submit flow, in characters.
pub const COMMENT_CHAR_LIMIT: usize = 500;

/// Prefix for generated feedback record ids.
pub const ID_PREFIX: &str = "feedback";

/// Filename sent in the export Content-Disposition header.
pub const EXPORT_FILENAME: &str = "fosdem-feedback.csv";

/// Plain-text body returned when there is nothing to export.
pub const NO_DATA_MESSAGE: &str = "No feedback data available";

/// Local-store key holding the set of video ids already fed back.
pub const SUBMITTED_KEY: &str = "kiosk_submitted_videos";

/// Local-store key holding the fallback feedback list.
pub const FALLBACK_KEY: &str = "kiosk_feedback_fallback";

/// Local-store key holding the buffered analytics events.
pub const ANALYTICS_KEY: &str = "kiosk_analytics_events";
