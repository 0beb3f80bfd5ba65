//! Search and pagination for SortingHat collections.
//!
//! This crate turns the tokens of a search box into a validated
//! [`SearchFilter`](sortinghat_api_rs::models::SearchFilter) and drives
//! paginated, deduplicated fetches of individuals, organizations and
//! countries as the filter and scroll position change.
//!
//! - [`filter`] compiles token sequences such as
//!   `["term", "john", "lastUpdated", "range", "2019..2020"]`.
//! - [`controller`] decides when a fetch is warranted and applies only the
//!   newest result.
//! - [`session`] runs a controller against a
//!   [`PaginatedSource`](sortinghat_api_rs::source::PaginatedSource).

pub mod controller;
pub mod error;
pub mod filter;
pub mod session;

#[cfg(test)]
mod testing;

pub use controller::{
    ControllerConfig, ControllerSnapshot, FetchCompletion, FetchRequest, PageState,
    PaginationController, ScrollMode, Status,
};
pub use error::{ErrorKind, Result, SearchError};
pub use filter::{compile_filter, FieldError};
pub use session::SearchSession;
