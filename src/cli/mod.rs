//! CLI module
//!
//! Command-line interface for harvesting a provider's collections.
//!
//! # Commands
//!
//! - `check` - Connect and validate the credentials
//! - `users` - Fetch all users
//! - `posts` - Fetch posts with their comments
//! - `run` - Fetch users, then posts (default)
//! - `providers` - List registered providers

mod commands;
mod logging;
mod runner;

pub use commands::{Cli, Commands};
pub use logging::{error_file_layer, init_tracing, DEFAULT_ERROR_LOG};
pub use runner::{
    harvest, save_posts, save_users, Runner, POSTS_OUTPUT, USERS_OUTPUT,
};
