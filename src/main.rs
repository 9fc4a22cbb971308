//! api-harvest CLI
//!
//! Fetches users and posts with comments from a configured provider

use api_harvest::cli::{init_tracing, Cli, Runner};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.error_log)?;

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
