//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::{
    create_client_with, list_providers, ApiClient, DEFAULT_PAGE_SIZE, DEFAULT_POSTS_PAGE_LIMIT,
};
use crate::compose::ComposeConfig;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::output::{FileSink, RecordSink};
use serde_json::json;
use std::time::Instant;
use tracing::{error, info, warn};

/// Result name for the users collection
pub const USERS_OUTPUT: &str = "users";

/// Result name for posts with comments
pub const POSTS_OUTPUT: &str = "posts";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.command() {
            Commands::Check => self.check().await,
            Commands::Users {
                page_size,
                page_limit,
            } => {
                let client = self.connect(ComposeConfig::default()).await?;
                save_users(client.as_ref(), &self.sink(), page_size, page_limit).await
            }
            Commands::Posts {
                page_size,
                page_limit,
                keep_going,
            } => {
                let compose = if keep_going {
                    ComposeConfig::keep_going()
                } else {
                    ComposeConfig::default()
                };
                let client = self.connect(compose).await?;
                save_posts(client.as_ref(), &self.sink(), page_size, Some(page_limit)).await
            }
            Commands::Run => {
                let client = self.connect(ComposeConfig::default()).await?;
                harvest(client.as_ref(), &self.sink()).await
            }
            Commands::Providers => {
                self.providers();
                Ok(())
            }
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        AppConfig::load(&self.cli.config)
    }

    fn sink(&self) -> FileSink {
        FileSink::new(&self.cli.output_dir, self.cli.format)
    }

    async fn connect(&self, compose: ComposeConfig) -> Result<Box<dyn ApiClient>> {
        let config = self.load_config()?;
        create_client_with(&self.cli.provider, &config, compose).await
    }

    async fn check(&self) -> Result<()> {
        let provider = &self.cli.provider;
        match self.connect(ComposeConfig::default()).await {
            Ok(_) => {
                println!("{}", json!({"provider": provider, "status": "SUCCEEDED"}));
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                println!(
                    "{}",
                    json!({"provider": provider, "status": "FAILED", "message": message})
                );
                Err(e)
            }
        }
    }

    fn providers(&self) {
        for name in list_providers() {
            println!("{name}");
        }
    }
}

/// Fetch users and save them under [`USERS_OUTPUT`]
pub async fn save_users(
    client: &dyn ApiClient,
    sink: &dyn RecordSink,
    page_size: u32,
    page_limit: Option<u32>,
) -> Result<()> {
    let started = Instant::now();
    let users = client.get_users(page_size, page_limit).await?;
    let path = sink.save(&users, USERS_OUTPUT)?;
    info!(
        "Fetched {} users in {:?} ({})",
        users.len(),
        started.elapsed(),
        path.display()
    );
    Ok(())
}

/// Fetch posts with comments and save them under [`POSTS_OUTPUT`]
///
/// Posts whose comments could not be fetched are still saved, without a
/// `comments` field; the operation then fails with `Error::Incomplete`.
pub async fn save_posts(
    client: &dyn ApiClient,
    sink: &dyn RecordSink,
    page_size: u32,
    page_limit: Option<u32>,
) -> Result<()> {
    let started = Instant::now();
    let composed = client.compose_posts(page_size, page_limit).await?;
    let path = sink.save(&composed.records, POSTS_OUTPUT)?;
    info!(
        "Fetched {} posts in {:?} ({})",
        composed.records.len(),
        started.elapsed(),
        path.display()
    );

    if composed.is_complete() {
        return Ok(());
    }

    for failure in &composed.failures {
        warn!(
            "Post #{} ({}) saved without comments: {}",
            failure.index,
            failure.parent_id.as_deref().unwrap_or("no id"),
            failure.error
        );
    }
    Err(Error::Incomplete {
        name: POSTS_OUTPUT.to_string(),
        failed: composed.failures.len(),
        total: composed.records.len(),
    })
}

/// Fetch users, then posts with comments, through one connected client
///
/// Each operation runs on its own: a failure is logged and the next one
/// still runs. Fails when any operation failed.
pub async fn harvest(client: &dyn ApiClient, sink: &dyn RecordSink) -> Result<()> {
    let mut failed = Vec::new();

    if let Err(e) = save_users(client, sink, DEFAULT_PAGE_SIZE, None).await {
        error!("Failed to fetch users from {}: {e}", client.provider());
        failed.push(USERS_OUTPUT);
    }

    let posts_limit = Some(DEFAULT_POSTS_PAGE_LIMIT);
    if let Err(e) = save_posts(client, sink, DEFAULT_PAGE_SIZE, posts_limit).await {
        error!("Failed to fetch posts from {}: {e}", client.provider());
        failed.push(POSTS_OUTPUT);
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::Other(format!("Failed operations: {}", failed.join(", "))))
    }
}
