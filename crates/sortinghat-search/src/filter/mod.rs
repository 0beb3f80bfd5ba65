//! Search token compiler.
//!
//! Turns the ordered chips of the search box into a validated
//! [`SearchFilter`] ready to be sent with a paginated query.
//!
//! # Supported Syntax
//!
//! ## Free text
//! - `term <value>` - match individuals or organizations by text
//! - `<value>` - a bare value is an implicit term
//!
//! ## Last update
//! - `lastUpdated < <date>`, also `<=`, `>`, `>=`
//! - `lastUpdated range <date>..<date>`
//!
//! Dates are partial: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`, normalized to
//! midnight UTC.
//!
//! # Example
//!
//! ```
//! use sortinghat_search_rs::filter::{compile_filter, FieldError};
//!
//! let filter = compile_filter(&["lastUpdated", "range", "2000..2001"]).unwrap();
//! assert_eq!(
//!     filter.last_updated.as_deref(),
//!     Some("2000-01-01T00:00:00.000Z..2001-01-01T00:00:00.000Z")
//! );
//!
//! let err = compile_filter(&["lastUpdated", "abc"]).unwrap_err();
//! assert!(matches!(err, FieldError::InvalidOperator { .. }));
//! ```

mod compiler;
mod date;
mod error;
mod token;

pub use compiler::{compile_filter, FilterCompiler};
pub use date::{format_instant, normalize_date, DateExpression, RANGE_SEPARATOR};
pub use error::{Field, FieldError, FieldResult};
pub use sortinghat_api_rs::models::SearchFilter;
pub use token::{classify_all, Comparison, Keyword, Operator, SearchToken};
