//! HTTP fetcher implementation
//!
//! This module handles the single network step of a scrape:
//! - Building the shared HTTP client with the browser-like user agent
//! - Issuing one GET per page (no retries)
//! - Classifying transport failures and non-success statuses
//! - Racing a fetch against a cancellation token

use crate::config::FetcherConfig;
use crate::{FetchError, FetchResult};
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Raw response of a successful fetch
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// URL as requested by the caller
    pub requested_url: String,

    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code (always in the success range)
    pub status: u16,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Response body bytes
    pub body: Vec<u8>,

    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

/// Builds the HTTP client shared by every fetch of a scraping session
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_scraper::config::FetcherConfig;
/// use page_scraper::pipeline::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | URL text does not parse | `FetchError::InvalidUrl` |
/// | Client timeout (request or body) | `FetchError::Timeout` |
/// | DNS failure, connection refused | `FetchError::Connect` |
/// | Any other transport failure | `FetchError::Transport` |
/// | Non-2xx status | `FetchError::Status` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult<RawDocument> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Fetching {}", parsed);

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    tracing::debug!(
        "Fetched {} ({} bytes, status {}, content type {:?})",
        final_url,
        body.len(),
        status.as_u16(),
        content_type
    );

    Ok(RawDocument {
        requested_url: url.to_string(),
        final_url,
        status: status.as_u16(),
        content_type,
        body: body.to_vec(),
        fetched_at: Utc::now(),
    })
}

/// Fetches a URL unless the token is cancelled first
///
/// An already-cancelled token never issues the request.
pub async fn fetch_url_with_cancel(
    client: &Client,
    url: &str,
    token: &CancellationToken,
) -> FetchResult<RawDocument> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            tracing::debug!("Fetch of {} cancelled", url);
            Err(FetchError::Cancelled { url: url.to_string() })
        }
        result = fetch_url(client, url) => result,
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url, source: error }
    } else {
        FetchError::Transport { url, source: error }
    }
}
