//! HTTP client module
//!
//! Provides the HTTP transport used by the connection check and the paginator.
//!
//! # Features
//!
//! - **Fixed Deadline**: every request fails with `Error::Timeout` once the
//!   configured timeout elapses (5s by default)
//! - **Authentication**: the provider's auth header is attached to every request
//! - **No Retries**: a single failed request is reported to the caller

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_TIMEOUT};
