//! Page-Scraper: structured content extraction for web pages
//!
//! This crate fetches a page over HTTP, parses it with a browser-grade HTML
//! parser, and extracts a [`PageRecord`] holding the document title, headings,
//! paragraphs, and tables.
//!
//! # Example
//!
//! ```no_run
//! use page_scraper::config::Config;
//! use page_scraper::pipeline::PageScraper;
//!
//! # async fn run() -> page_scraper::Result<()> {
//! let scraper = PageScraper::new(&Config::default())?;
//! let record = scraper.scrape("https://example.com/").await?;
//! println!("{} headings", record.headings.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod output;
pub mod pipeline;
pub mod record;

use thiserror::Error;

/// Main error type for a scrape operation
///
/// The pipeline stops at the first failure, so a scrape error is always
/// either a fetch failure or a parse failure. Extraction cannot fail.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Network and HTTP-level failures raised by the fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} {reason} for {url}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Fetch cancelled for {url}")]
    Cancelled { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// Returns the HTTP status code when the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the request ran into the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Failures interpreting a fetched payload as HTML
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Payload from {url} is binary data, not HTML")]
    Binary { url: String },

    #[error("Unsupported content type '{content_type}' for {url}")]
    UnsupportedContentType { url: String, content_type: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{extract, fetch_url, parse, PageScraper};
pub use record::{HeadingEntry, PageRecord, ParagraphEntry, TableEntry};
