//! Error types for the filter compiler.

use std::fmt;

use thiserror::Error;

use crate::error::ErrorKind;

/// A specialized Result type for filter compilation.
pub type FieldResult<T> = Result<T, FieldError>;

/// The filter field an error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Term,
    LastUpdated,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Term => f.write_str("term"),
            Field::LastUpdated => f.write_str("lastUpdated"),
        }
    }
}

/// A single field-level compilation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Not a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` calendar date.
    #[error("invalid date '{value}' (expected YYYY, YYYY-MM or YYYY-MM-DD)")]
    InvalidDate {
        /// The raw value as typed.
        value: String,
    },

    /// A range value without exactly one `..` between two dates.
    #[error("invalid range '{value}' (expected <date>..<date>)")]
    InvalidRange {
        /// The raw value as typed.
        value: String,
    },

    /// A range whose start falls after its end.
    #[error("range start {start} is after range end {end}")]
    InvalidRangeOrder {
        /// Normalized start instant.
        start: String,
        /// Normalized end instant.
        end: String,
    },

    /// `lastUpdated` not followed by `<`, `<=`, `>`, `>=` or `range`.
    #[error(
        "invalid operator {} for lastUpdated (expected <, <=, >, >= or range)",
        quoted_or_none(.operator)
    )]
    InvalidOperator {
        /// The token found in operator position, if any.
        operator: Option<String>,
    },

    /// A keyword with nothing left to consume.
    #[error("missing value for {field}")]
    MissingValue {
        /// The field whose value is missing.
        field: Field,
    },
}

fn quoted_or_none(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "(none)".to_string(),
    }
}

impl FieldError {
    /// Creates an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        FieldError::InvalidDate {
            value: value.into(),
        }
    }

    /// Creates an invalid range error.
    pub fn invalid_range(value: impl Into<String>) -> Self {
        FieldError::InvalidRange {
            value: value.into(),
        }
    }

    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            FieldError::MissingValue { field } => *field,
            _ => Field::LastUpdated,
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::InvalidDate { .. } => ErrorKind::InvalidDate,
            FieldError::InvalidRange { .. } => ErrorKind::InvalidRange,
            FieldError::InvalidRangeOrder { .. } => ErrorKind::InvalidRangeOrder,
            FieldError::InvalidOperator { .. } => ErrorKind::InvalidOperator,
            FieldError::MissingValue { .. } => ErrorKind::MissingValue,
        }
    }
}
