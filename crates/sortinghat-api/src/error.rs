//! Error types for the SortingHat query client.

use std::fmt;

/// Errors reported by the SortingHat service itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http { status: u16, message: String },
    /// The GraphQL response carried an `errors` array.
    GraphQl { messages: Vec<String> },
    /// The response had neither `data` for the requested field nor errors.
    MissingData { field: String },
    /// Network/connection error.
    Network { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
            ApiError::GraphQl { messages } => match messages.as_slice() {
                [] => write!(f, "GraphQL error"),
                [single] => write!(f, "GraphQL error: {}", single),
                many => write!(f, "GraphQL errors: {}", many.join("; ")),
            },
            ApiError::MissingData { field } => write!(f, "response has no data for '{}'", field),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns true if re-issuing the same query could succeed.
    ///
    /// The client never retries on its own; this only informs the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Top-level error for the query client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with an error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl Error {
    /// Returns the service error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if re-issuing the same query could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api(e) => e.is_transient(),
            Error::Json(_) | Error::InvalidEndpoint { .. } => false,
        }
    }
}

/// Result type for query client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_http() {
        let error = ApiError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[test]
    fn test_api_error_display_graphql_single() {
        let error = ApiError::GraphQl {
            messages: vec!["Invalid filter".to_string()],
        };
        assert_eq!(error.to_string(), "GraphQL error: Invalid filter");
    }

    #[test]
    fn test_api_error_display_graphql_many() {
        let error = ApiError::GraphQl {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        let display = error.to_string();
        assert!(display.contains("first"));
        assert!(display.contains("second"));
    }

    #[test]
    fn test_api_error_display_missing_data() {
        let error = ApiError::MissingData {
            field: "individuals".to_string(),
        };
        assert!(error.to_string().contains("individuals"));
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(ApiError::Network {
            message: "timeout".to_string(),
        });
        assert!(error.to_string().contains("timeout"));
    }

    #[test]
    fn test_api_error_is_transient() {
        assert!(ApiError::Network {
            message: "reset".to_string()
        }
        .is_transient());
        assert!(ApiError::Http {
            status: 502,
            message: String::new()
        }
        .is_transient());
        assert!(ApiError::Http {
            status: 429,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::Http {
            status: 400,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::GraphQl { messages: vec![] }.is_transient());
    }

    #[test]
    fn test_error_from_api_error() {
        let error: Error = ApiError::GraphQl {
            messages: vec!["boom".to_string()],
        }
        .into();
        assert!(error.as_api_error().is_some());
        assert!(error.to_string().starts_with("API error:"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_err.into();
        assert!(error.as_api_error().is_none());
        assert!(!error.is_transient());
    }
}
