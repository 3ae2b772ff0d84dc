//! Scrape pipeline
//!
//! This module contains the three stages of a scrape and the runner that
//! chains them:
//! - Fetching raw bytes over HTTP
//! - Parsing them into a document tree
//! - Extracting title, headings, paragraphs, and tables

mod extractor;
mod fetcher;
mod parser;
mod runner;

pub use extractor::extract;
pub use fetcher::{build_http_client, fetch_url, fetch_url_with_cancel, RawDocument};
pub use parser::{
    element_attributes, element_text, normalize_whitespace, parse, parse_html, DocumentTree,
};
pub use runner::{process_document, PageScraper};

use crate::config::Config;
use crate::record::PageRecord;

/// Scrapes a single page with a one-off client
///
/// Callers scraping more than one page should keep a [`PageScraper`] so the
/// connection pool is reused.
///
/// # Arguments
///
/// * `url` - Absolute URL of the page
/// * `config` - The scraper configuration
pub async fn scrape(url: &str, config: &Config) -> crate::Result<PageRecord> {
    let scraper = PageScraper::new(config)?;
    scraper.scrape(url).await
}
