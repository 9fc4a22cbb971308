//! CLI commands and argument parsing

use super::logging::DEFAULT_ERROR_LOG;
use crate::client::{DEFAULT_PAGE_SIZE, DEFAULT_POSTS_PAGE_LIMIT};
use crate::config::DEFAULT_CONFIG_PATH;
use crate::output::DEFAULT_OUTPUT_DIR;
use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Harvest paginated collections from a token-authenticated REST API
#[derive(Parser, Debug)]
#[command(name = "api-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider credentials file (YAML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Provider to connect to
    #[arg(short, long, global = true, default_value = "Dummy")]
    pub provider: String,

    /// Directory results are written to
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Output file format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// File ERROR-level log events are appended to
    #[arg(long, global = true, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Subcommand to run, `run` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Connect and validate the credentials
    Check,

    /// Fetch all users
    Users {
        /// Records per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Maximum number of pages to fetch
        #[arg(long)]
        page_limit: Option<u32>,
    },

    /// Fetch posts with their comments
    Posts {
        /// Records per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Maximum number of post pages to fetch
        #[arg(long, default_value_t = DEFAULT_POSTS_PAGE_LIMIT)]
        page_limit: u32,

        /// Keep composing when a post's comments cannot be fetched
        #[arg(long)]
        keep_going: bool,
    },

    /// Fetch users, then posts with comments
    Run,

    /// List registered providers
    Providers,
}
