//! Search and countries command implementations.
//!
//! Compiles the search tokens, then drives a [`SearchSession`] against the
//! configured SortingHat endpoint.

use sortinghat_api_rs::client::SortingHatClient;
use sortinghat_api_rs::models::SearchFilter;
use sortinghat_api_rs::query::Collection;
use sortinghat_search_rs::{compile_filter, ControllerConfig, ControllerSnapshot, SearchSession};

use super::config::{load_config, Config};
use super::{CommandContext, CommandError, Result};
use crate::output::{format_snapshot_json, format_snapshot_table};

/// Options for the search command.
#[derive(Debug)]
pub struct SearchOptions {
    pub collection: Collection,
    /// Page to show (1-based).
    pub page: u32,
    /// Overrides the configured page size.
    pub page_size: Option<u32>,
    /// Fetch every page.
    pub all: bool,
    pub tokens: Vec<String>,
}

impl SearchOptions {
    /// Options for listing countries.
    pub fn countries(all: bool) -> Self {
        Self {
            collection: Collection::Countries,
            page: 1,
            page_size: None,
            all,
            tokens: Vec::new(),
        }
    }

    /// Picks the controller mode and page size.
    fn controller_config(&self, config: &Config) -> ControllerConfig {
        if self.all {
            ControllerConfig::infinite()
                .with_page_size(self.page_size.unwrap_or(config.pagination.infinite_page_size))
        } else {
            ControllerConfig::paged()
                .with_page_size(self.page_size.unwrap_or(config.pagination.table_page_size))
        }
    }
}

/// Executes the search command.
///
/// # Errors
///
/// Returns a filter error before any request if the tokens do not compile,
/// and a search error if a fetch fails.
pub async fn execute(ctx: &CommandContext, opts: &SearchOptions) -> Result<()> {
    let filter = compile_filter(&opts.tokens)?;
    let config = load_config()?;
    let client = ctx.client(&config)?;

    let snapshot = run_search(client, &config, opts, filter).await?;

    if ctx.json_output {
        println!("{}", format_snapshot_json(opts.collection, &snapshot)?);
    } else if !ctx.quiet {
        print!("{}", format_snapshot_table(&snapshot, ctx.use_colors));
    }

    Ok(())
}

/// Runs the fetches for `opts` and returns the final snapshot.
async fn run_search(
    client: SortingHatClient,
    config: &Config,
    opts: &SearchOptions,
    filter: SearchFilter,
) -> Result<ControllerSnapshot> {
    let mut session = SearchSession::new(client, opts.collection, opts.controller_config(config));

    session.on_filter_changed(Some(filter)).await?;

    if opts.all {
        let loaded = session.load_all().await?;
        tracing::info!(collection = %opts.collection, loaded, "fetched all pages");
    } else if opts.page > 1 && !session.request_page(opts.page).await? {
        return Err(CommandError::PageOutOfRange {
            page: opts.page,
            num_pages: session.controller().page_state().num_pages,
        });
    }

    Ok(session.snapshot())
}
