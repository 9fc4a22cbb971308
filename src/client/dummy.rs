//! Client for the dummyapi.io data API
//!
//! Collections live at `{base_url}/user` and `{base_url}/post`, comments of a
//! post at `{base_url}/post/{id}/comment`. Every page reply has the shape
//! `{ "data": [...], "page": n, "total": n, "limit": n }`.

use super::ApiClient;
use crate::auth::{check_connection, AuthHeader};
use crate::compose::{ChildResource, ComposeConfig, Composed, Composer};
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};
use crate::pagination::{paginate, Endpoint};
use crate::types::Record;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

const USERS_PATH: &str = "/user";
const POSTS_PATH: &str = "/post";
const COMMENT_SEGMENT: &str = "comment";
const COMMENTS_FIELD: &str = "comments";

/// Client for the "Dummy" provider
///
/// Only obtainable through [`DummyApiClient::connect`], which runs the
/// connection check; a value of this type has always passed it.
#[derive(Debug, Clone)]
pub struct DummyApiClient {
    http: HttpClient,
    compose: ComposeConfig,
}

impl DummyApiClient {
    /// Registry key of this provider
    pub const PROVIDER: &'static str = "Dummy";

    /// Build a client and verify the connection
    pub async fn connect(base_url: impl Into<String>, auth: AuthHeader) -> Result<Self> {
        Self::connect_with_timeout(base_url, auth, DEFAULT_TIMEOUT).await
    }

    /// Build a client from provider credentials and verify the connection
    pub async fn from_config(config: &ProviderConfig) -> Result<Self> {
        let auth = AuthHeader::new(&config.header_name, &config.token);
        Self::connect_with_timeout(&config.base_url, auth, config.timeout()).await
    }

    /// Build a client with a custom request deadline and verify the connection
    pub async fn connect_with_timeout(
        base_url: impl Into<String>,
        auth: AuthHeader,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;

        let config = HttpClientConfig::builder()
            .base_url(&base_url)
            .timeout(timeout)
            .build();
        let http = HttpClient::with_auth(config, auth)?;

        let client = Self {
            http,
            compose: ComposeConfig::default(),
        };
        client.check_connection().await?;
        info!("Connected to {} API at {base_url}", Self::PROVIDER);

        Ok(client)
    }

    /// Set the failure policy for comment fetches
    #[must_use]
    pub fn with_compose_config(mut self, compose: ComposeConfig) -> Self {
        self.compose = compose;
        self
    }

    fn endpoint(&self, path: &str, page_size: u32) -> Endpoint {
        Endpoint::new(self.http.build_url(path)).with_page_size(page_size)
    }
}

#[async_trait]
impl ApiClient for DummyApiClient {
    fn provider(&self) -> &str {
        Self::PROVIDER
    }

    async fn check_connection(&self) -> Result<()> {
        check_connection(&self.http).await
    }

    async fn get_users(&self, page_size: u32, page_limit: Option<u32>) -> Result<Vec<Record>> {
        paginate(&self.http, self.endpoint(USERS_PATH, page_size), page_limit).await
    }

    async fn compose_posts(&self, page_size: u32, page_limit: Option<u32>) -> Result<Composed> {
        Composer::new(self.http.clone(), self.compose)
            .attach_children(
                &self.endpoint(POSTS_PATH, page_size),
                page_limit,
                &ChildResource::new(COMMENT_SEGMENT, COMMENTS_FIELD),
            )
            .await
    }
}
