//! Page-number paginator
//!
//! Drives repeated GETs against one endpoint until the server runs out of
//! pages, a page adds nothing, or the caller's page limit is hit.

use super::types::{Collected, Endpoint, Page, PageResponse, PaginationState, StopReason};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::Record;
use async_stream::try_stream;
use futures::{pin_mut, Stream, TryStreamExt};
use tracing::{debug, info};

/// Lazy paginator over a page-numbered collection endpoint
///
/// Each call to [`Paginator::pages`] or [`Paginator::records`] starts a new,
/// single-pass run from the endpoint's own parameters. Requests are issued
/// one at a time, only as the stream is polled.
#[derive(Debug, Clone)]
pub struct Paginator {
    http: HttpClient,
    endpoint: Endpoint,
    page_limit: Option<u32>,
}

impl Paginator {
    /// Create a paginator with no page limit
    pub fn new(http: HttpClient, endpoint: Endpoint) -> Self {
        Self {
            http,
            endpoint,
            page_limit: None,
        }
    }

    /// Stop after this many requests, whatever the server reports
    ///
    /// A limit of zero still issues the first request.
    #[must_use]
    pub fn with_page_limit(mut self, page_limit: Option<u32>) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Stream of pages; the last one carries its [`StopReason`]
    ///
    /// The first failed request ends the stream with that error.
    pub fn pages(&self) -> impl Stream<Item = Result<Page>> + '_ {
        try_stream! {
            let mut state = PaginationState::new(self.endpoint.params.clone());

            loop {
                let response: PageResponse = self
                    .http
                    .get_json(&self.endpoint.url, &state.params)
                    .await?;

                let stop = state.process(&response, self.page_limit);

                debug!(
                    "{}: page {}/{} returned {} records",
                    self.endpoint.url,
                    response.page,
                    response.total,
                    response.data.len()
                );

                yield Page {
                    number: response.page,
                    total: response.total,
                    records: response.data,
                    stop,
                };

                if let Some(reason) = stop {
                    info!(
                        "{}: fetched {} records in {} pages ({reason})",
                        self.endpoint.url, state.total_fetched, state.pages_fetched
                    );
                    break;
                }
            }
        }
    }

    /// Stream of records in arrival order
    pub fn records(&self) -> impl Stream<Item = Result<Record>> + '_ {
        try_stream! {
            let pages = self.pages();
            pin_mut!(pages);

            while let Some(page) = pages.try_next().await? {
                for record in page.records {
                    yield record;
                }
            }
        }
    }

    /// Run to completion and keep everything
    pub async fn collect_all(&self) -> Result<Collected> {
        let pages = self.pages();
        pin_mut!(pages);

        let mut records = Vec::new();
        let mut pages_fetched = 0;
        let mut stop = StopReason::Exhausted;

        while let Some(page) = pages.try_next().await? {
            pages_fetched += 1;
            records.extend(page.records);
            if let Some(reason) = page.stop {
                stop = reason;
            }
        }

        Ok(Collected {
            records,
            pages_fetched,
            stop,
        })
    }
}

/// Fetch every record from an endpoint, bounded by an optional page limit
pub async fn paginate(
    http: &HttpClient,
    endpoint: Endpoint,
    page_limit: Option<u32>,
) -> Result<Vec<Record>> {
    let collected = Paginator::new(http.clone(), endpoint)
        .with_page_limit(page_limit)
        .collect_all()
        .await?;
    Ok(collected.records)
}
