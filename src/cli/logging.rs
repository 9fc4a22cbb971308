//! Tracing setup for the binary
//!
//! Console output honours `RUST_LOG` (INFO by default). ERROR events are
//! also appended to a log file so failed runs leave a trace on disk.

use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Default error log, relative to the working directory
pub const DEFAULT_ERROR_LOG: &str = "errors.log";

/// Layer appending ERROR events to `path`, creating the file if needed
pub fn error_file_layer<S>(path: &Path) -> anyhow::Result<impl Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open error log {}", path.display()))?;

    Ok(fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR))
}

/// Install the global subscriber
pub fn init_tracing(error_log: &Path) -> anyhow::Result<()> {
    let console = fmt::layer().with_filter(
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
    );

    tracing_subscriber::registry()
        .with(console)
        .with(error_file_layer(error_log)?)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
