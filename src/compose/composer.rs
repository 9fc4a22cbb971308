//! Parent/child composer
//!
//! Walks a parent collection and, for every parent as it arrives, paginates
//! `{parent_url}/{id}/{segment}` and stores the result under a field of the
//! parent record.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{Endpoint, Paginator, StopReason};
use crate::types::{JsonValue, Record};
use futures::{pin_mut, TryStreamExt};
use tracing::{debug, info, warn};

/// How child fetch failures are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Abort the whole composition on the first child failure
    pub fail_fast: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self { fail_fast: true }
    }
}

impl ComposeConfig {
    /// Collect child failures instead of aborting
    pub fn keep_going() -> Self {
        Self { fail_fast: false }
    }
}

/// Nested resource attached to each parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildResource {
    /// Path segment after the parent id (e.g., "comment")
    pub segment: String,
    /// Field the children are stored under (e.g., "comments")
    pub field: String,
    /// Parent field holding the id
    pub id_field: String,
}

impl ChildResource {
    /// Create a child resource keyed by the parent's `id`
    pub fn new(segment: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            field: field.into(),
            id_field: "id".to_string(),
        }
    }

    /// Use a different parent id field
    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Extract the parent id as a path segment
    pub fn parent_id(&self, record: &Record) -> Result<String> {
        match record.get(&self.id_field) {
            Some(JsonValue::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(JsonValue::Number(n)) => Ok(n.to_string()),
            _ => Err(Error::missing_field(&self.id_field)),
        }
    }
}

/// A child fetch that failed while `fail_fast` was off
#[derive(Debug)]
pub struct ChildFailure {
    /// Parent id, if one could be read
    pub parent_id: Option<String>,
    /// Position of the parent in the result
    pub index: usize,
    /// What went wrong
    pub error: Error,
}

/// Result of a composition
#[derive(Debug)]
pub struct Composed {
    /// Parents in arrival order, each with its children attached
    pub records: Vec<Record>,
    /// Parents whose children could not be fetched (no child field set)
    pub failures: Vec<ChildFailure>,
    /// Why the parent pagination stopped
    pub parent_stop: StopReason,
}

impl Composed {
    /// True when every child fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Drop the failure report and keep the records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Attaches nested child collections to parent records
#[derive(Debug, Clone)]
pub struct Composer {
    http: HttpClient,
    config: ComposeConfig,
}

impl Composer {
    /// Create a composer
    pub fn new(http: HttpClient, config: ComposeConfig) -> Self {
        Self { http, config }
    }

    /// Paginate the parents (bounded by `page_limit`) and attach every
    /// parent's children (unbounded)
    ///
    /// Child requests reuse the parent's query parameters, so they share its
    /// page size.
    pub async fn attach_children(
        &self,
        parent: &Endpoint,
        page_limit: Option<u32>,
        child: &ChildResource,
    ) -> Result<Composed> {
        let paginator =
            Paginator::new(self.http.clone(), parent.clone()).with_page_limit(page_limit);
        let pages = paginator.pages();
        pin_mut!(pages);

        let mut records = Vec::new();
        let mut failures = Vec::new();
        let mut parent_stop = StopReason::Exhausted;

        while let Some(page) = pages.try_next().await? {
            if let Some(stop) = page.stop {
                parent_stop = stop;
            }

            for mut record in page.records {
                let index = records.len();
                match self.fetch_children(parent, child, &record).await {
                    Ok(children) => {
                        let children = children.into_iter().map(JsonValue::Object).collect();
                        record.insert(child.field.clone(), JsonValue::Array(children));
                    }
                    Err(error) if self.config.fail_fast => return Err(error),
                    Err(error) => {
                        let parent_id = child.parent_id(&record).ok();
                        warn!(
                            "Skipping {} for parent {}: {error}",
                            child.field,
                            parent_id.as_deref().unwrap_or("<no id>")
                        );
                        failures.push(ChildFailure {
                            parent_id,
                            index,
                            error,
                        });
                    }
                }
                records.push(record);
            }
        }

        info!(
            "{}: composed {} parents ({} child failures)",
            parent.url,
            records.len(),
            failures.len()
        );

        Ok(Composed {
            records,
            failures,
            parent_stop,
        })
    }

    async fn fetch_children(
        &self,
        parent: &Endpoint,
        child: &ChildResource,
        record: &Record,
    ) -> Result<Vec<Record>> {
        let id = child.parent_id(record)?;
        let endpoint = parent.child(&id, &child.segment);
        debug!("Fetching {} for parent {id}", child.field);

        let collected = Paginator::new(self.http.clone(), endpoint)
            .collect_all()
            .await?;
        Ok(collected.records)
    }
}
