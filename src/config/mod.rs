//! Configuration module for Page-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults.
//!
//! # Example
//!
//! ```no_run
//! use page_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Request timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
