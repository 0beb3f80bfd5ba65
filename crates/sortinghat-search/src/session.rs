//! Single-owner driver tying a controller to a source.

use sortinghat_api_rs::models::SearchFilter;
use sortinghat_api_rs::query::Collection;
use sortinghat_api_rs::source::PaginatedSource;

use crate::controller::{
    ControllerConfig, ControllerSnapshot, FetchRequest, PaginationController, Status,
};
use crate::error::Result;
use crate::filter::compile_filter;

/// Runs controller requests to completion, one at a time.
///
/// Suited to consumers that await each fetch before reacting again, such
/// as command-line tools. Concurrent consumers drive a
/// [`PaginationController`] directly.
///
/// # Example
///
/// ```no_run
/// use sortinghat_api_rs::prelude::*;
/// use sortinghat_search_rs::controller::ControllerConfig;
/// use sortinghat_search_rs::session::SearchSession;
///
/// # async fn run() -> sortinghat_search_rs::error::Result<()> {
/// let client = SortingHatClient::new("http://localhost:8000/api/")?;
/// let mut session =
///     SearchSession::new(client, Collection::Individuals, ControllerConfig::infinite());
///
/// session.search(&["term", "john", "lastUpdated", ">=", "2020"]).await?;
/// session.load_all().await?;
/// println!("{} matches", session.snapshot().entities.len());
/// # Ok(())
/// # }
/// ```
pub struct SearchSession<S> {
    source: S,
    controller: PaginationController,
}

impl<S: PaginatedSource> SearchSession<S> {
    pub fn new(source: S, collection: Collection, config: ControllerConfig) -> Self {
        Self {
            source,
            controller: PaginationController::new(collection, config),
        }
    }

    /// Loads the first page.
    pub async fn mount(&mut self) -> Result<bool> {
        let request = self.controller.mount();
        self.run(request).await
    }

    /// Loads page `page`; returns false if the request was not warranted.
    pub async fn request_page(&mut self, page: u32) -> Result<bool> {
        let request = self.controller.request_page(page);
        self.run(request).await
    }

    /// Compiles `tokens` and loads the first page for the resulting filter.
    ///
    /// A compile error leaves the current filter and results untouched.
    pub async fn search<T: AsRef<str>>(&mut self, tokens: &[T]) -> Result<bool> {
        let filter = compile_filter(tokens)?;
        self.on_filter_changed(Some(filter)).await
    }

    pub async fn on_filter_changed(&mut self, filter: Option<SearchFilter>) -> Result<bool> {
        let request = self.controller.on_filter_changed(filter);
        self.run(Some(request)).await
    }

    pub async fn on_scroll_bottom(&mut self) -> Result<bool> {
        let request = self.controller.on_scroll_bottom();
        self.run(request).await
    }

    /// Scrolls until the collection is exhausted.
    ///
    /// Loads page 1 first if nothing has been loaded, and retries a failed
    /// scroll. Stops early if a page comes back empty. Returns the number of
    /// entities held afterwards.
    ///
    /// # Errors
    ///
    /// Returns the fetch error if a page fails, or the held error if the
    /// controller is errored and cannot scroll.
    pub async fn load_all(&mut self) -> Result<usize> {
        if !self.controller.has_loaded() {
            self.mount().await?;
        }

        while matches!(self.controller.status(), Status::Idle | Status::Errored) {
            let before = self.controller.entities().len();
            if !self.on_scroll_bottom().await? {
                break;
            }
            if self.controller.entities().len() == before {
                tracing::debug!(
                    collection = %self.controller.collection(),
                    "empty page before exhaustion, stopping"
                );
                break;
            }
        }

        if self.controller.status() == Status::Errored {
            if let Some(err) = self.controller.last_error() {
                return Err(err.clone());
            }
        }

        Ok(self.controller.entities().len())
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.controller.current_state()
    }

    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sends `request` and applies its completion.
    ///
    /// A failed fetch is recorded in the controller and also returned.
    async fn run(&mut self, request: Option<FetchRequest>) -> Result<bool> {
        let Some(request) = request else {
            return Ok(false);
        };

        let completion = request.send(&self.source).await;
        let applied = self.controller.complete(completion);

        match self.controller.last_error() {
            Some(error) if applied && self.controller.status() == Status::Errored => {
                Err(error.clone())
            }
            _ => Ok(applied),
        }
    }
}

impl<S> std::fmt::Debug for SearchSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
