// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

//! # api-harvest
//!
//! Client for a token-authenticated REST API that serves its collections
//! in numbered pages.
//!
//! ## Features
//!
//! - **Connection check**: one probe request at construction, with failures
//!   classified into [`AuthFailure`] kinds
//! - **Pagination**: lazy page streams with an optional page ceiling and a
//!   reported [`StopReason`](pagination::StopReason)
//! - **Composition**: child collections (comments) attached to each parent
//!   record (posts), fail-fast or keep-going
//! - **Providers**: clients are created by name from a YAML credentials file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_harvest::{create_client, AppConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load("config/config.yaml")?;
//!     let client = create_client("Dummy", &config).await?;
//!
//!     let users = client.get_users(10, None).await?;
//!     let posts = client.get_posts_with_comments(10, Some(5)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    ApiClient (client)                    │
//! │  check_connection   get_users   get_posts_with_comments  │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌──────────┬──────────────┬─┴────────────┬─────────────────┐
//! │   Auth   │     HTTP     │   Paginate   │     Compose     │
//! ├──────────┼──────────────┼──────────────┼─────────────────┤
//! │ Header   │ GET + query  │ page/limit   │ parent → child  │
//! │ Probe    │ Timeout      │ Stop reason  │ Fail policy     │
//! └──────────┴──────────────┴──────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Provider credentials
pub mod config;

/// Auth header and connection check
pub mod auth;

/// HTTP client
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Parent/child record composition
pub mod compose;

/// API clients and provider registry
pub mod client;

/// Result persistence
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{AuthFailure, Error, Result};
pub use types::*;

pub use client::{create_client, ApiClient, DummyApiClient};
pub use config::{AppConfig, ProviderConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
