//! Pagination types
//!
//! Defines the endpoint, the wire shape of a page and the state tracked
//! across one pagination run.

use crate::types::{Record, StringMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter advanced on every page
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

// ============================================================================
// Endpoint
// ============================================================================

/// An absolute URL plus its query parameters
///
/// Never mutated by a pagination run; each run works on its own copy
/// of `params`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Endpoint {
    /// Absolute URL
    pub url: String,
    /// Query parameters sent with every page request
    pub params: StringMap,
}

impl Endpoint {
    /// Create an endpoint with no query parameters
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: StringMap::new(),
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Set the page size parameter
    #[must_use]
    pub fn with_page_size(self, page_size: u32) -> Self {
        self.param(LIMIT_PARAM, page_size)
    }

    /// Endpoint for a nested resource: `{url}/{id}/{segment}`
    ///
    /// Keeps every query parameter except the page cursor.
    pub fn child(&self, id: &str, segment: &str) -> Self {
        let mut params = self.params.clone();
        params.remove(PAGE_PARAM);
        Self {
            url: format!(
                "{}/{}/{}",
                self.url.trim_end_matches('/'),
                id,
                segment.trim_start_matches('/')
            ),
            params,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// One API reply: a slice of the collection plus pagination metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Records on this page
    #[serde(default)]
    pub data: Vec<Record>,
    /// Page number reported by the server
    #[serde(default)]
    pub page: u64,
    /// Total reported by the server, compared against `page`
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// Run Results
// ============================================================================

/// Why a pagination run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The server reported `page >= total`
    Exhausted,
    /// The last page added no records
    NoGrowth,
    /// The caller's page limit was reached; more data may exist
    PageLimit,
}

impl StopReason {
    /// True when the run stopped before the server ran out of data
    pub fn is_truncated(self) -> bool {
        matches!(self, Self::PageLimit)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::NoGrowth => write!(f, "no new records"),
            Self::PageLimit => write!(f, "page limit reached"),
        }
    }
}

/// A fetched page as yielded by the page stream
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number reported by the server
    pub number: u64,
    /// Total reported by the server
    pub total: u64,
    /// Records on this page
    pub records: Vec<Record>,
    /// Set on the final page of a run
    pub stop: Option<StopReason>,
}

/// Fully materialized result of a pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    /// Records in arrival order
    pub records: Vec<Record>,
    /// Number of requests issued
    pub pages_fetched: u32,
    /// Why the run stopped
    pub stop: StopReason,
}

impl Collected {
    /// True when the page limit cut the run short
    pub fn is_truncated(&self) -> bool {
        self.stop.is_truncated()
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Tracks pagination state during one run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Query parameters for the next request
    pub params: StringMap,
    /// Requests issued so far
    pub pages_fetched: u32,
    /// Page advances so far, compared against the page limit
    pub page_count: u32,
    /// Records received so far
    pub total_fetched: u64,
}

impl PaginationState {
    /// Create state starting from the endpoint's parameters
    pub fn new(params: StringMap) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Account for a received page and decide whether to continue
    ///
    /// Returns `None` when another request should be made; `params` then
    /// carries the next page number. The termination checks run before the
    /// page limit, so a run that ends naturally on its last allowed page
    /// reports `Exhausted` or `NoGrowth` rather than `PageLimit`.
    pub fn process(
        &mut self,
        response: &PageResponse,
        page_limit: Option<u32>,
    ) -> Option<StopReason> {
        self.pages_fetched += 1;
        let before = self.total_fetched;
        self.total_fetched += response.data.len() as u64;

        if response.page >= response.total {
            return Some(StopReason::Exhausted);
        }
        if self.total_fetched == before {
            return Some(StopReason::NoGrowth);
        }

        self.params
            .insert(PAGE_PARAM.to_string(), (response.page + 1).to_string());
        self.page_count += 1;

        match page_limit {
            Some(limit) if self.page_count >= limit => Some(StopReason::PageLimit),
            _ => None,
        }
    }
}
