//! JSON file output
//!
//! Records are written as UTF-8 JSON (non-ASCII characters are kept as-is),
//! pretty-printed with two-space indentation unless configured otherwise.

use crate::config::OutputConfig;
use crate::output::traits::{OutputResult, RecordSink};
use crate::record::PageRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default file name for a single scraped page
pub const DEFAULT_FILE_NAME: &str = "scraped_data.json";

/// Writes records as JSON files into a directory
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    /// Creates a sink writing into `directory`
    pub fn new(directory: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            directory: directory.into(),
            pretty,
        }
    }

    /// Creates a sink from the output configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.directory, config.pretty)
    }

    /// The directory records are written into
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl RecordSink for JsonFileSink {
    fn write_record(&self, record: &PageRecord, name: &str) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(ensure_json_extension(name));

        let mut writer = BufWriter::new(File::create(&path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, record)?;
        } else {
            serde_json::to_writer(&mut writer, record)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!("Record for {} saved to {}", record.source_url, path.display());
        Ok(path)
    }
}

/// Appends `.json` unless the name already ends with it (case-insensitive)
pub fn ensure_json_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}

/// Derives a file name from a URL: `data_<url without scheme, '/' → '_'>.json`
///
/// # Example
///
/// ```
/// use page_scraper::output::default_file_name;
///
/// assert_eq!(
///     default_file_name("https://quotes.toscrape.com/"),
///     "data_quotes.toscrape.com_.json"
/// );
/// ```
pub fn default_file_name(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let name: String = without_scheme
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '?' | '*' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    format!("data_{}.json", name)
}
