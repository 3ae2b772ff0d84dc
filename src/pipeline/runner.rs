//! Scrape pipeline runner
//!
//! [`PageScraper`] owns the shared HTTP client and runs
//! fetch → parse → extract for one or many URLs. The pipeline stops at the
//! first failure: a fetch error skips parsing, a parse error skips extraction.

use crate::config::Config;
use crate::pipeline::extractor::extract;
use crate::pipeline::fetcher::{
    build_http_client, fetch_url, fetch_url_with_cancel, RawDocument,
};
use crate::pipeline::parser::parse;
use crate::record::PageRecord;
use crate::{FetchResult, Result};
use futures::future::join_all;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// Runs the scrape pipeline over a shared HTTP client
///
/// Cloning is cheap: clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct PageScraper {
    client: Client,
}

impl PageScraper {
    /// Creates a scraper with a client built from the fetcher configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PageScraper)` - Ready to scrape
    /// * `Err(FetchError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = build_http_client(&config.fetcher)?;
        Ok(Self { client })
    }

    /// Creates a scraper around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches, parses, and extracts a single page
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page
    ///
    /// # Returns
    ///
    /// * `Ok(PageRecord)` - The extracted record; its `url` is `url` as given
    /// * `Err(ScrapeError)` - The fetch or the parse failed
    pub async fn scrape(&self, url: &str) -> Result<PageRecord> {
        let raw = fetch_url(&self.client, url).await.map_err(|e| {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            e
        })?;

        process_document(url, &raw)
    }

    /// Like [`scrape`](Self::scrape), but the fetch can be cancelled through `token`
    ///
    /// Cancellation only applies to the network phase; once the body has
    /// arrived, parsing and extraction run to completion.
    pub async fn scrape_with_cancel(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<PageRecord> {
        let raw = fetch_url_with_cancel(&self.client, url, token)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                e
            })?;

        process_document(url, &raw)
    }

    /// Scrapes several pages concurrently
    ///
    /// Each URL runs its own independent pipeline. Results are returned in
    /// the same order as `urls`, one per URL.
    pub async fn scrape_many<S: AsRef<str>>(&self, urls: &[S]) -> Vec<Result<PageRecord>> {
        tracing::info!("Scraping {} pages", urls.len());
        join_all(urls.iter().map(|url| self.scrape(url.as_ref()))).await
    }
}

/// Parses and extracts a fetched document
///
/// # Arguments
///
/// * `source_url` - The URL reported in the record
/// * `raw` - The fetched document
pub fn process_document(source_url: &str, raw: &RawDocument) -> Result<PageRecord> {
    let tree = parse(raw).map_err(|e| {
        tracing::warn!("Failed to parse {}: {}", source_url, e);
        e
    })?;

    Ok(extract(&tree, source_url))
}
