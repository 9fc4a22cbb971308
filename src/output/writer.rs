//! File sink
//!
//! Writes an aggregate result to `<dir>/<name>.<ext>` as JSON or JSON Lines.

use crate::error::{Error, Result, ResultExt};
use crate::types::{OutputFormat, Record};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Destination for an aggregate result
pub trait RecordSink {
    /// Persist `records` under `name`, returning where they went
    fn save(&self, records: &[Record], name: &str) -> Result<PathBuf>;
}

/// Writes each result to its own file in one directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    format: OutputFormat,
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, OutputFormat::default())
    }
}

impl FileSink {
    /// Create a sink writing into `dir`
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Path a result named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        let ext = self.format.extension();
        let name = name.strip_suffix(&format!(".{ext}")).unwrap_or(name);
        self.dir.join(format!("{name}.{ext}"))
    }

    fn write_json(writer: &mut impl Write, records: &[Record]) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut *writer, formatter);
        records.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn write_jsonl(writer: &mut impl Write, records: &[Record]) -> Result<()> {
        for record in records {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl RecordSink for FileSink {
    fn save(&self, records: &[Record], name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(Error::output("Output name must not be empty"));
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.path_for(name);
        let file = File::create(&path).map_err(|e| Error::Output {
            message: format!("Failed to create file {}: {e}", path.display()),
        })?;
        let mut writer = BufWriter::new(file);

        match self.format {
            OutputFormat::Json => Self::write_json(&mut writer, records)?,
            OutputFormat::Jsonl => Self::write_jsonl(&mut writer, records)?,
        }
        writer.flush()?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }
}
