//! Page metadata and paginated result wrappers.

use serde::{Deserialize, Serialize};

/// Pagination metadata reported by the service.
///
/// `page`, `pageSize`, `numPages` and `totalResults` are always selected;
/// the remaining fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub num_pages: u32,
    pub total_results: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u64>,
}

impl PageInfo {
    /// Builds page metadata for a response that did not carry any.
    ///
    /// Used for collections the service returns in one piece.
    pub fn single_page(page: u32, page_size: u32, count: usize) -> Self {
        let total = count as u64;
        Self {
            page,
            page_size,
            num_pages: u32::from(count > 0),
            total_results: total,
            has_next: false,
            has_prev: false,
            start_index: (count > 0).then_some(1),
            end_index: (count > 0).then_some(total),
        }
    }

    /// Returns true if no page follows this one.
    pub fn is_last(&self) -> bool {
        self.num_pages == 0 || self.page >= self.num_pages
    }
}

/// One page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub entities: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Converts the entities while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            entities: self.entities.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}
