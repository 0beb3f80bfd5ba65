//! SortingHat GraphQL query client.
//!
//! Shapes and issues paginated queries for individuals, organizations and
//! countries, and adapts the typed responses.
//!
//! # Quick Start
//!
//! ```
//! use sortinghat_api_rs::prelude::*;
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
pub mod query;
pub mod source;
