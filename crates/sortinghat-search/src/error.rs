//! Error taxonomy shared by the compiler and the pagination controller.

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::filter::FieldError;

/// Classification of every error this crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidDate,
    InvalidRange,
    InvalidRangeOrder,
    InvalidOperator,
    MissingValue,
    RemoteFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidDate => "invalid_date",
            ErrorKind::InvalidRange => "invalid_range",
            ErrorKind::InvalidRangeOrder => "invalid_range_order",
            ErrorKind::InvalidOperator => "invalid_operator",
            ErrorKind::MissingValue => "missing_value",
            ErrorKind::RemoteFailure => "remote_failure",
        };
        f.write_str(name)
    }
}

/// Errors surfaced to search consumers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The search tokens did not compile.
    #[error("invalid search: {0}")]
    Filter(#[from] FieldError),

    /// The remote query failed; the error is passed through unchanged.
    #[error("remote query failed: {0}")]
    RemoteFailure(Arc<sortinghat_api_rs::error::Error>),
}

impl SearchError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Filter(e) => e.kind(),
            SearchError::RemoteFailure(_) => ErrorKind::RemoteFailure,
        }
    }

    /// Returns the underlying remote error, if any.
    pub fn remote(&self) -> Option<&sortinghat_api_rs::error::Error> {
        match self {
            SearchError::RemoteFailure(e) => Some(e),
            SearchError::Filter(_) => None,
        }
    }
}

/// Serialized as `{"kind": ..., "message": ...}`.
impl Serialize for SearchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchError", 2)?;
        state.serialize_field("kind", &self.kind().to_string())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<sortinghat_api_rs::error::Error> for SearchError {
    fn from(value: sortinghat_api_rs::error::Error) -> Self {
        SearchError::RemoteFailure(Arc::new(value))
    }
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
