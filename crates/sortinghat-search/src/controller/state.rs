//! Page state, controller status and configuration.

use serde::Serialize;
use sortinghat_api_rs::models::{Entity, PageInfo};

use crate::error::SearchError;

/// Page size used by paged tables.
pub const TABLE_PAGE_SIZE: u32 = 10;

/// Page size used by continuous (infinite-scroll) listings.
pub const INFINITE_PAGE_SIZE: u32 = 50;

/// How fetched pages are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// One page at a time; each fetch replaces the entities.
    Paged,
    /// Pages accumulate as the consumer scrolls.
    Infinite,
}

/// Construction-time settings of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    page_size: u32,
    mode: ScrollMode,
}

impl ControllerConfig {
    /// Paged table preset.
    pub fn paged() -> Self {
        Self {
            page_size: TABLE_PAGE_SIZE,
            mode: ScrollMode::Paged,
        }
    }

    /// Infinite-scroll preset.
    pub fn infinite() -> Self {
        Self {
            page_size: INFINITE_PAGE_SIZE,
            mode: ScrollMode::Infinite,
        }
    }

    /// Overrides the page size. Zero is raised to one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }
}

/// Controller lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Idle,
    Fetching,
    Exhausted,
    Errored,
}

/// Pagination position for the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
    pub num_pages: u32,
    pub total_results: u64,
    /// No page follows the current one.
    pub exhausted: bool,
}

impl PageState {
    /// State before anything has been fetched.
    pub fn initial(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            num_pages: 0,
            total_results: 0,
            exhausted: false,
        }
    }

    /// State reported by the service for a fetched page.
    pub fn from_page_info(info: &PageInfo) -> Self {
        Self {
            current_page: info.page.max(1),
            page_size: info.page_size,
            num_pages: info.num_pages,
            total_results: info.total_results,
            exhausted: info.is_last(),
        }
    }
}

/// Immutable view of a controller handed to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub status: Status,
    pub page_state: PageState,
    pub entities: Vec<Entity>,
    pub last_error: Option<SearchError>,
}
