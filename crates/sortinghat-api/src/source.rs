//! The paginated query seam consumed by search controllers.

use async_trait::async_trait;

use crate::client::SortingHatClient;
use crate::error::Result;
use crate::models::{Country, Entity, Individual, Organization, Page, SearchFilter};
use crate::query::{Collection, QueryVariables};

/// Anything that can serve one page of a collection.
///
/// Implementations issue a single request per call and must not retry;
/// failures are returned unchanged.
#[async_trait]
pub trait PaginatedSource: Send + Sync {
    /// Fetches `page` (1-based) of `collection` with `page_size` entries.
    async fn fetch_paginated(
        &self,
        collection: Collection,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Entity>>;
}

#[async_trait]
impl PaginatedSource for SortingHatClient {
    async fn fetch_paginated(
        &self,
        collection: Collection,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Entity>> {
        let variables = QueryVariables::new(page, page_size, filter.cloned());
        let page = match collection {
            Collection::Individuals => self
                .fetch_page::<Individual>(collection, &variables)
                .await?
                .map(Entity::from),
            Collection::Organizations => self
                .fetch_page::<Organization>(collection, &variables)
                .await?
                .map(Entity::from),
            Collection::Countries => self
                .fetch_page::<Country>(collection, &variables)
                .await?
                .map(Entity::from),
        };
        Ok(page)
    }
}

#[async_trait]
impl<S: PaginatedSource + ?Sized> PaginatedSource for std::sync::Arc<S> {
    async fn fetch_paginated(
        &self,
        collection: Collection,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Entity>> {
        (**self).fetch_paginated(collection, page, page_size, filter).await
    }
}
