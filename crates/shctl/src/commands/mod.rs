//! Command implementations for the shctl CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod compile;
pub mod completions;
pub mod config;
pub mod search;

use std::time::Duration;

use sortinghat_api_rs::client::SortingHatClient;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Search tokens did not compile.
    #[error("filter error: {0}")]
    Filter(#[from] sortinghat_search_rs::FieldError),

    /// A paginated fetch failed.
    #[error("search error: {0}")]
    Search(sortinghat_search_rs::SearchError),

    /// The requested page lies beyond the last page.
    #[error("page {page} is out of range ({num_pages} pages)")]
    PageOutOfRange { page: u32, num_pages: u32 },

    /// Client construction or request error.
    #[error("API error: {0}")]
    Api(#[from] sortinghat_api_rs::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<sortinghat_search_rs::SearchError> for CommandError {
    fn from(value: sortinghat_search_rs::SearchError) -> Self {
        match value {
            sortinghat_search_rs::SearchError::Filter(e) => CommandError::Filter(e),
            other => CommandError::Search(other),
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Endpoint given on the command line or in `SHCTL_ENDPOINT`.
    pub endpoint_override: Option<String>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            endpoint_override: cli.endpoint.clone(),
        }
    }

    /// Builds a client from the override or the config file.
    pub fn client(&self, config: &config::Config) -> Result<SortingHatClient> {
        let endpoint = self
            .endpoint_override
            .clone()
            .unwrap_or_else(|| config.endpoint.clone());

        tracing::debug!(%endpoint, timeout_secs = config.timeout_secs, "building client");
        let client = SortingHatClient::builder(endpoint)
            .request_timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(client)
    }
}
