//! API client facade
//!
//! [`ApiClient`] is the capability set every provider offers. Clients are
//! created through the registry ([`create_client`]), which looks the provider
//! up by name and returns it only after its connection check has passed.

mod dummy;
mod registry;

pub use dummy::DummyApiClient;
pub use registry::{create_client, create_client_with, is_registered, list_providers};

use crate::compose::Composed;
use crate::error::Result;
use crate::types::Record;
use async_trait::async_trait;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default page limit for posts, which fan out into one comment fetch each
pub const DEFAULT_POSTS_PAGE_LIMIT: u32 = 5;

/// Operations offered by every provider
#[async_trait]
pub trait ApiClient: Send + Sync + std::fmt::Debug {
    /// Registry key of the provider
    fn provider(&self) -> &str;

    /// Probe the API and classify the answer
    async fn check_connection(&self) -> Result<()>;

    /// All users, `page_size` per request, at most `page_limit` requests
    async fn get_users(&self, page_size: u32, page_limit: Option<u32>) -> Result<Vec<Record>>;

    /// Posts (at most `page_limit` pages), each with a `comments` field
    /// holding all of its comments
    async fn get_posts_with_comments(
        &self,
        page_size: u32,
        page_limit: Option<u32>,
    ) -> Result<Vec<Record>> {
        Ok(self.compose_posts(page_size, page_limit).await?.into_records())
    }

    /// Posts with comments, together with the posts whose comments could
    /// not be fetched under a keep-going policy
    async fn compose_posts(&self, page_size: u32, page_limit: Option<u32>) -> Result<Composed>;
}
