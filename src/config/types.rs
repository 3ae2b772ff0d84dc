use serde::Deserialize;

/// Browser-like client signature sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure for Page-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Ceiling for a whole request, including the body (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Ceiling for establishing the connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects the client follows
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_redirects: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where JSON records are written
    pub directory: String,

    /// Pretty-print JSON with two-space indentation
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            pretty: true,
        }
    }
}
