//! HTTP client with a fixed per-request deadline
//!
//! Thin wrapper over `reqwest` that joins paths onto the provider's base URL,
//! attaches the auth header, and turns an elapsed deadline into
//! `Error::Timeout`. There is no retry logic.

use crate::auth::AuthHeader;
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("api-harvest/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all relative requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client used by every fetch operation
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    auth: Option<AuthHeader>,
}

impl HttpClient {
    /// Create a client without credentials
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config,
            auth: None,
        })
    }

    /// Create a client that sends an auth header on every request
    pub fn with_auth(config: HttpClientConfig, auth: AuthHeader) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.auth = Some(auth);
        Ok(client)
    }

    /// GET `url` and return the response whatever its status
    pub async fn get(&self, url: &str) -> Result<Response> {
        let full_url = self.build_url(url);
        self.send(&full_url, self.client.get(&full_url)).await
    }

    /// GET `url` with `query` and parse the JSON body, rejecting non-2xx
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &StringMap) -> Result<T> {
        let full_url = self.build_url(url);
        let mut req = self.client.get(&full_url);
        if !query.is_empty() {
            req = req.query(query);
        }

        let response = self.send(&full_url, req).await?;
        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, full_url: &str, mut req: RequestBuilder) -> Result<Response> {
        if let Some(ref auth) = self.auth {
            req = auth.apply(req);
        }

        match req.send().await {
            Ok(response) => {
                debug!("GET {full_url} -> {}", response.status().as_u16());
                Ok(response)
            }
            Err(e) if e.is_timeout() => Err(Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }),
            Err(e) => Err(Error::Http(e)),
        }
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("has_auth", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}
