//! Compiled filter output formatting.

use serde::Serialize;
use sortinghat_api_rs::models::SearchFilter;

/// JSON output structure for the compile command.
#[derive(Serialize)]
pub struct CompiledFilterOutput<'a> {
    pub tokens: &'a [String],
    /// Exactly what would be sent as the `filters` variable.
    pub filters: &'a SearchFilter,
}

/// Formats a compiled filter as JSON.
pub fn format_filter_json(
    tokens: &[String],
    filter: &SearchFilter,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CompiledFilterOutput {
        tokens,
        filters: filter,
    })
}

/// Formats a compiled filter as `key: value` lines.
pub fn format_filter_table(filter: &SearchFilter) -> String {
    if filter.is_empty() {
        return "(empty filter)\n".to_string();
    }

    let mut output = String::new();
    if let Some(term) = &filter.term {
        output.push_str(&format!("term: {term}\n"));
    }
    if let Some(last_updated) = &filter.last_updated {
        output.push_str(&format!("lastUpdated: {last_updated}\n"));
    }
    output
}
