//! Provider registry
//!
//! Maps a provider name to the constructor of its client, so callers can
//! go from a config key to a connected [`ApiClient`].

use super::{ApiClient, DummyApiClient};
use crate::compose::ComposeConfig;
use crate::config::{AppConfig, ProviderConfig};
use crate::error::{Error, Result};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::LazyLock;

type Constructor =
    fn(ProviderConfig, ComposeConfig) -> BoxFuture<'static, Result<Box<dyn ApiClient>>>;

/// Registered providers
static PROVIDERS: LazyLock<HashMap<&'static str, Constructor>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Constructor> = HashMap::new();
    m.insert(DummyApiClient::PROVIDER, connect_dummy);
    m
});

fn connect_dummy(
    config: ProviderConfig,
    compose: ComposeConfig,
) -> BoxFuture<'static, Result<Box<dyn ApiClient>>> {
    Box::pin(async move {
        let client = DummyApiClient::from_config(&config)
            .await?
            .with_compose_config(compose);
        Ok(Box::new(client) as Box<dyn ApiClient>)
    })
}

/// Check if a provider name is registered
pub fn is_registered(provider: &str) -> bool {
    PROVIDERS.contains_key(provider)
}

/// List registered provider names, sorted
pub fn list_providers() -> Vec<&'static str> {
    let mut names: Vec<_> = PROVIDERS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Create a connected client for a provider with the default fan-out policy
pub async fn create_client(provider: &str, config: &AppConfig) -> Result<Box<dyn ApiClient>> {
    create_client_with(provider, config, ComposeConfig::default()).await
}

/// Create a connected client for a provider
///
/// Fails with `UnknownProvider` when the name is missing from either the
/// registry or the configuration, and with the classified `AuthFailure`
/// when the connection check does not pass.
pub async fn create_client_with(
    provider: &str,
    config: &AppConfig,
    compose: ComposeConfig,
) -> Result<Box<dyn ApiClient>> {
    let constructor = PROVIDERS
        .get(provider)
        .ok_or_else(|| Error::unknown_provider(provider))?;
    let credentials = config.provider(provider)?.clone();

    constructor(credentials, compose).await
}
