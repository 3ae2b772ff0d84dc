//! Output handler traits and errors
//!
//! This module defines the seams between a scraped [`PageRecord`] and its
//! downstream consumers: sinks that persist records and generators that turn
//! records into API documentation.

use crate::record::PageRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Documentation generation failed: {0}")]
    Generation(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for scraped records
pub trait RecordSink {
    /// Persists a record under the given name
    ///
    /// # Arguments
    ///
    /// * `record` - The record to persist
    /// * `name` - Name of the stored record (a file name for file sinks)
    ///
    /// # Returns
    ///
    /// The location the record was written to
    fn write_record(&self, record: &PageRecord, name: &str) -> OutputResult<PathBuf>;
}

/// Downstream generator turning a record into API documentation
///
/// The scraper never calls a generation service itself. Implementations wrap
/// whichever service the caller uses and return its raw text answer.
#[async_trait]
pub trait DocsGenerator: Send + Sync {
    /// Generates documentation text for a record
    async fn generate_docs(&self, record: &PageRecord) -> OutputResult<String>;
}
