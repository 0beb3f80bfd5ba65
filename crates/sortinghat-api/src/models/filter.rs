//! Search filter sent alongside paginated queries.

use serde::{Deserialize, Serialize};

/// A compiled, validated search filter.
///
/// Absent fields are omitted from the serialized form; the service never
/// sees empty strings.
///
/// # Examples
///
/// ```
/// use sortinghat_api_rs::models::SearchFilter;
///
/// let filter = SearchFilter::default().with_term("test");
/// let json = serde_json::to_string(&filter).unwrap();
/// assert_eq!(json, r#"{"term":"test"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    /// Free-text match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Compiled date expression, e.g. `<2000-01-01T00:00:00.000Z`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl SearchFilter {
    /// Returns a copy with `term` set, or cleared when blank.
    pub fn with_term(mut self, term: impl AsRef<str>) -> Self {
        let trimmed = term.as_ref().trim();
        self.term = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Returns a copy with `last_updated` set to an already compiled expression.
    pub fn with_last_updated(mut self, expression: impl Into<String>) -> Self {
        self.last_updated = Some(expression.into());
        self
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.last_updated.is_none()
    }
}
