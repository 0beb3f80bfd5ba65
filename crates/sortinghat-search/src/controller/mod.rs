//! Pagination and infinite-scroll controller.
//!
//! The controller owns the page position, the active filter and the
//! loaded entities for one collection. It never performs I/O itself:
//! every event returns an optional [`FetchRequest`] that the caller runs
//! against a [`PaginatedSource`] and feeds back through
//! [`PaginationController::complete`].
//!
//! Each request carries a sequence number. Only the completion for the
//! most recently issued request is applied, so a slow response for a
//! superseded page or filter can never overwrite newer state.
//!
//! # Example
//!
//! ```no_run
//! use sortinghat_api_rs::prelude::*;
//! use sortinghat_search_rs::controller::{ControllerConfig, PaginationController};
//!
//! # async fn run() -> sortinghat_api_rs::error::Result<()> {
//! let client = SortingHatClient::new("http://localhost:8000/api/")?;
//! let mut controller =
//!     PaginationController::new(Collection::Individuals, ControllerConfig::paged());
//!
//! if let Some(request) = controller.mount() {
//!     let completion = request.send(&client).await;
//!     controller.complete(completion);
//! }
//! println!("{} individuals", controller.page_state().total_results);
//! # Ok(())
//! # }
//! ```

mod state;

pub use state::{
    ControllerConfig, ControllerSnapshot, PageState, ScrollMode, Status, INFINITE_PAGE_SIZE,
    TABLE_PAGE_SIZE,
};

use sortinghat_api_rs::models::{Entity, Page, SearchFilter};
use sortinghat_api_rs::query::{Collection, QueryVariables};
use sortinghat_api_rs::source::PaginatedSource;

use crate::error::SearchError;

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    seq: u64,
    collection: Collection,
    variables: QueryVariables,
    append: bool,
}

impl FetchRequest {
    /// Sequence number tying the eventual completion to this request.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn variables(&self) -> &QueryVariables {
        &self.variables
    }

    /// Returns true if the fetched entities extend the loaded list.
    pub fn appends(&self) -> bool {
        self.append
    }

    /// Performs the request once against `source`.
    pub async fn send<S>(&self, source: &S) -> FetchCompletion
    where
        S: PaginatedSource + ?Sized,
    {
        let result = source
            .fetch_paginated(
                self.collection,
                self.variables.page,
                self.variables.page_size,
                self.variables.filter.as_ref(),
            )
            .await;

        FetchCompletion {
            seq: self.seq,
            result,
        }
    }
}

/// Outcome of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchCompletion {
    seq: u64,
    result: sortinghat_api_rs::error::Result<Page<Entity>>,
}

impl FetchCompletion {
    /// Builds a completion for a request performed by other means.
    pub fn new(seq: u64, result: sortinghat_api_rs::error::Result<Page<Entity>>) -> Self {
        Self { seq, result }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    seq: u64,
    page: u32,
    append: bool,
}

/// Drives paginated fetches for one collection.
#[derive(Debug)]
pub struct PaginationController {
    collection: Collection,
    config: ControllerConfig,
    filter: Option<SearchFilter>,
    status: Status,
    page_state: PageState,
    entities: Vec<Entity>,
    last_error: Option<SearchError>,
    has_loaded: bool,
    last_seq: u64,
    in_flight: Option<InFlight>,
}

impl PaginationController {
    pub fn new(collection: Collection, config: ControllerConfig) -> Self {
        Self {
            collection,
            config,
            filter: None,
            status: Status::Idle,
            page_state: PageState::initial(config.page_size()),
            entities: Vec::new(),
            last_error: None,
            has_loaded: false,
            last_seq: 0,
            in_flight: None,
        }
    }

    /// Initial load: requests page 1 with the current filter.
    pub fn mount(&mut self) -> Option<FetchRequest> {
        if self.is_in_flight(1, false) {
            tracing::debug!(collection = %self.collection, "mount ignored, page 1 already in flight");
            return None;
        }
        Some(self.issue(1, false))
    }

    /// Requests a specific page, replacing the loaded entities on success.
    ///
    /// Returns `None` for page zero, for pages beyond a known page count
    /// and for a page that is already in flight. Once a page has loaded the
    /// reported count is authoritative; an empty collection still has page 1.
    pub fn request_page(&mut self, page: u32) -> Option<FetchRequest> {
        if page == 0 {
            tracing::debug!(collection = %self.collection, "page 0 requested, ignoring");
            return None;
        }

        let num_pages = self.page_state.num_pages;
        let known = self.has_loaded || num_pages > 0;
        if known && page > num_pages.max(1) {
            tracing::debug!(
                collection = %self.collection,
                page,
                num_pages,
                "page out of range, ignoring"
            );
            return None;
        }

        if self.is_in_flight(page, false) {
            tracing::debug!(collection = %self.collection, page, "page already in flight");
            return None;
        }

        Some(self.issue(page, false))
    }

    /// Replaces the filter and restarts from page 1.
    ///
    /// Any request still in flight becomes stale.
    pub fn on_filter_changed(&mut self, filter: Option<SearchFilter>) -> FetchRequest {
        self.filter = filter.filter(|f| !f.is_empty());
        self.page_state = PageState::initial(self.config.page_size());
        self.has_loaded = false;
        tracing::debug!(collection = %self.collection, filter = ?self.filter, "filter changed");
        self.issue(1, false)
    }

    /// Loads the next page when the consumer reaches the end of the list.
    ///
    /// Only meaningful in [`ScrollMode::Infinite`]. Ignored while a fetch is
    /// in flight or once the collection is exhausted.
    pub fn on_scroll_bottom(&mut self) -> Option<FetchRequest> {
        if self.config.mode() != ScrollMode::Infinite {
            return None;
        }
        if !matches!(self.status, Status::Idle | Status::Errored) || self.page_state.exhausted {
            tracing::trace!(
                collection = %self.collection,
                status = ?self.status,
                exhausted = self.page_state.exhausted,
                "scroll ignored"
            );
            return None;
        }

        let request = if self.has_loaded {
            self.issue(self.page_state.current_page + 1, true)
        } else {
            self.issue(1, false)
        };
        Some(request)
    }

    /// Applies the outcome of a fetch.
    ///
    /// Returns false when the completion belongs to a superseded request and
    /// was discarded.
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        let Some(in_flight) = self.in_flight else {
            tracing::debug!(seq = completion.seq, "no fetch in flight, discarding completion");
            return false;
        };
        if completion.seq != in_flight.seq || completion.seq != self.last_seq {
            tracing::debug!(
                seq = completion.seq,
                latest = self.last_seq,
                "discarding stale completion"
            );
            return false;
        }

        self.in_flight = None;
        let append = in_flight.append;
        match completion.result {
            Ok(page) => {
                self.page_state = PageState::from_page_info(&page.page_info);
                if append {
                    self.entities.extend(page.entities);
                } else {
                    self.entities = page.entities;
                }
                self.has_loaded = true;
                self.last_error = None;
                self.status = if self.page_state.exhausted {
                    Status::Exhausted
                } else {
                    Status::Idle
                };
                tracing::debug!(
                    collection = %self.collection,
                    page = self.page_state.current_page,
                    num_pages = self.page_state.num_pages,
                    loaded = self.entities.len(),
                    "page applied"
                );
            }
            Err(e) => {
                tracing::warn!(
                    collection = %self.collection,
                    page = in_flight.page,
                    error = %e,
                    "fetch failed"
                );
                self.last_error = Some(SearchError::from(e));
                self.status = Status::Errored;
            }
        }
        true
    }

    /// Returns an immutable copy of the observable state.
    pub fn current_state(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            status: self.status,
            page_state: self.page_state,
            entities: self.entities.clone(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn filter(&self) -> Option<&SearchFilter> {
        self.filter.as_ref()
    }

    pub fn last_error(&self) -> Option<&SearchError> {
        self.last_error.as_ref()
    }

    /// Returns true once a page has been applied for the current filter.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    /// An append of a page does not satisfy a replace of the same page.
    fn is_in_flight(&self, page: u32, append: bool) -> bool {
        self.status == Status::Fetching
            && self
                .in_flight
                .is_some_and(|f| f.page == page && f.append == append)
    }

    fn issue(&mut self, page: u32, append: bool) -> FetchRequest {
        self.last_seq += 1;
        self.in_flight = Some(InFlight {
            seq: self.last_seq,
            page,
            append,
        });
        self.status = Status::Fetching;

        let variables = QueryVariables::new(page, self.config.page_size(), self.filter.clone())
            .for_collection(self.collection);
        tracing::debug!(
            collection = %self.collection,
            seq = self.last_seq,
            page,
            append,
            "issuing fetch"
        );

        FetchRequest {
            seq: self.last_seq,
            collection: self.collection,
            variables,
            append,
        }
    }
}
