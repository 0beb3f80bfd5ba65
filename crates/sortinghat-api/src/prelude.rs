//! Prelude module for convenient imports.
//!
//! ```
//! use sortinghat_api_rs::prelude::*;
//!
//! // SortingHatClient, PaginatedSource, Collection, QueryVariables,
//! // Error, ApiError, Result and the data models are now in scope.
//! ```

// Client types
pub use crate::client::{SortingHatClient, SortingHatClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Query shaping
pub use crate::query::{Collection, QueryVariables};
pub use crate::source::PaginatedSource;

// Data models
pub use crate::models::{
    Country, Domain, Enrollment, Entity, Identity, Individual, Organization, OrganizationRef, Page,
    PageInfo, Profile, SearchFilter,
};
