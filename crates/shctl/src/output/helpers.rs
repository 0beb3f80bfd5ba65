//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use sortinghat_search_rs::Status;

/// Truncates a string to at most `max_len` characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Shortens a main key to its first 8 characters.
pub fn short_key(mk: &str) -> String {
    mk.chars().take(8).collect()
}

/// Formats the controller status for display.
pub fn format_status(status: Status, use_colors: bool) -> String {
    let label = match status {
        Status::Idle => "more pages available",
        Status::Fetching => "fetching",
        Status::Exhausted => "end of results",
        Status::Errored => "error",
    };

    if use_colors {
        match status {
            Status::Errored => label.red().to_string(),
            Status::Exhausted => label.green().to_string(),
            _ => label.yellow().to_string(),
        }
    } else {
        label.to_string()
    }
}

/// Dims `text` when colors are on.
pub fn dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
