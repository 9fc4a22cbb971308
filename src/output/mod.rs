//! Output module
//!
//! Persists aggregate results. The core only produces records in memory;
//! a [`RecordSink`] decides where and how they are stored.

mod writer;

pub use writer::{FileSink, RecordSink, DEFAULT_OUTPUT_DIR};

#[cfg(test)]
mod tests;
