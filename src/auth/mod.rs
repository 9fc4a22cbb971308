//! Authentication module
//!
//! Covers the two halves of talking to a token-protected API:
//!
//! - `AuthHeader` attaches the provider's token header to each request
//! - `check_connection` probes the API once and classifies the answer into
//!   an [`AuthFailure`](crate::error::AuthFailure)

mod check;
mod types;

pub use check::{check_connection, classify_response, PROBE_PATH};
pub use types::AuthHeader;

#[cfg(test)]
mod tests;
