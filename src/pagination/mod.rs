//! Pagination module
//!
//! Turns a page-numbered REST collection into a complete, bounded sequence
//! of records.
//!
//! # Overview
//!
//! A run repeats one GET per page, replacing only the `page` query parameter,
//! and stops on the first of:
//!
//! - the server reports `page >= total` ([`StopReason::Exhausted`])
//! - a page adds no records ([`StopReason::NoGrowth`])
//! - the caller's page limit is reached ([`StopReason::PageLimit`])

mod paginator;
mod types;

pub use paginator::{paginate, Paginator};
pub use types::{
    Collected, Endpoint, Page, PageResponse, PaginationState, StopReason, LIMIT_PARAM,
    PAGE_PARAM,
};
