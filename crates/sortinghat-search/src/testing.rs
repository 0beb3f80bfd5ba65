//! In-memory paginated source used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use sortinghat_api_rs::error::{ApiError, Result};
use sortinghat_api_rs::models::{Entity, Organization, Page, PageInfo, SearchFilter};
use sortinghat_api_rs::query::Collection;
use sortinghat_api_rs::source::PaginatedSource;

/// A recorded `fetch_paginated` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub collection: Collection,
    pub page: u32,
    pub page_size: u32,
    pub filter: Option<SearchFilter>,
}

/// Serves organizations named `org-0`, `org-1`, ... filtered by term.
pub struct MemorySource {
    names: Vec<String>,
    failures: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
}

impl MemorySource {
    pub fn new(count: usize) -> Self {
        Self {
            names: (0..count).map(|i| format!("org-{i}")).collect(),
            failures: Mutex::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next `count` fetches fail with a network error.
    pub fn fail_next(&self, count: usize) {
        *self.failures.lock().unwrap() = count;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn organization(name: &str) -> Entity {
    Entity::Organization(Organization {
        name: name.to_string(),
        domains: Vec::new(),
        enrollments: Vec::new(),
    })
}

#[async_trait]
impl PaginatedSource for MemorySource {
    async fn fetch_paginated(
        &self,
        collection: Collection,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Entity>> {
        self.calls.lock().unwrap().push(Call {
            collection,
            page,
            page_size,
            filter: filter.cloned(),
        });

        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(ApiError::Network {
                    message: "connection reset".to_string(),
                }
                .into());
            }
        }

        let term = filter.and_then(|f| f.term.as_deref());
        let matching: Vec<&String> = self
            .names
            .iter()
            .filter(|name| term.map_or(true, |t| name.contains(t)))
            .collect();

        let size = page_size.max(1) as usize;
        let total = matching.len();
        let num_pages = total.div_ceil(size) as u32;
        let start = (page.saturating_sub(1) as usize) * size;
        let entities: Vec<Entity> = matching
            .iter()
            .skip(start)
            .take(size)
            .map(|name| organization(name))
            .collect();

        Ok(Page {
            page_info: PageInfo {
                page,
                page_size,
                num_pages,
                total_results: total as u64,
                has_next: page < num_pages,
                has_prev: page > 1,
                start_index: None,
                end_index: None,
            },
            entities,
        })
    }
}
