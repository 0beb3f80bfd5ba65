//! Data types returned by, and sent to, the SortingHat GraphQL service.
//!
//! Entity shapes follow the selections made by the queries in
//! [`crate::query`]; fields the service may omit are optional or defaulted.

mod entity;
mod filter;
mod page;

pub use entity::*;
pub use filter::*;
pub use page::*;
