//! Output module for persisting and presenting scraped records
//!
//! This module handles:
//! - Writing records as JSON files
//! - Printing console summaries of records
//! - Preparing records for an external documentation generator

mod docs;
mod json;
mod summary;
mod traits;

pub use docs::{build_docs_prompt, generate_docs_yaml, strip_yaml_fence};
pub use json::{default_file_name, ensure_json_extension, JsonFileSink, DEFAULT_FILE_NAME};
pub use summary::{format_record_summary, print_record_summary};
pub use traits::{DocsGenerator, OutputError, OutputResult, RecordSink};
