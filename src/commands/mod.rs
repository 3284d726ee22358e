//! CLI command implementations for kiosk.
//!
//! Each submodule implements one subcommand:
//!
//! - [`serve`] - run the feedback API server
//! - [`submit`] - submit one piece of feedback from the terminal
//! - [`export`] - dump stored feedback as CSV
//! - [`videos`] - list the demo video catalog

pub mod export;
pub mod serve;
pub mod submit;
pub mod videos;
