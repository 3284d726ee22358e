//! Kiosk client: the submit flow that used to live in the booth web page.
//!
//! Re-architected from ambient browser state into explicit pieces:
//!
//! - [`LocalStore`] - persistence port for string-keyed JSON values, with
//!   file and memory implementations
//! - [`Session`] - view state: current video plus the monotone set of
//!   video ids already fed back
//! - [`SubmitFlow`] - posts a submission to the spreadsheet endpoint and
//!   falls back to local persistence when the endpoint cannot confirm
//!   delivery
//! - [`analytics`] - event buffering and per-demo summaries

mod flow;
mod local;
mod session;

pub mod analytics;

pub use flow::{Submission, SubmitFlow, SubmitOutcome};
pub use local::{FileStore, LocalStore, MemoryStore};
pub use session::{Session, ViewState};
