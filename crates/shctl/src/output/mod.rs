//! Output formatting utilities for the shctl CLI.
//!
//! - [`entities`] - search result tables and JSON
//! - [`filter`] - compiled filter output
//! - [`helpers`] - common formatting utilities (truncation, status)

mod entities;
mod filter;
pub mod helpers;

pub use entities::{format_snapshot_json, format_snapshot_table};
pub use filter::{format_filter_json, format_filter_table};
