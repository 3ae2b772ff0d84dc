//! Page-Scraper main entry point
//!
//! This is the command-line interface for scraping pages into JSON records.

use anyhow::{bail, Context};
use clap::Parser;
use page_scraper::config::{load_config, Config};
use page_scraper::output::{
    default_file_name, print_record_summary, JsonFileSink, RecordSink, DEFAULT_FILE_NAME,
};
use page_scraper::pipeline::PageScraper;
use page_scraper::PageRecord;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Scraper: structured content extraction for web pages
///
/// Fetches each URL, extracts its title, headings, paragraphs, and tables,
/// prints a short summary, and saves the record as JSON.
#[derive(Parser, Debug)]
#[command(name = "page-scraper")]
#[command(version)]
#[command(about = "Extract headings, paragraphs, and tables from web pages", long_about = None)]
struct Cli {
    /// URLs to scrape (absolute http:// or https:// URLs)
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output file name (single URL only; ".json" is appended when missing)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Print records as JSON to stdout instead of saving them
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.output.is_some() && cli.urls.len() > 1 {
        bail!("--output can only be used with a single URL");
    }

    for url in &cli.urls {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("'{}' is not a URL starting with http:// or https://", url);
        }
    }

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let scraper = PageScraper::new(&config).context("Failed to build HTTP client")?;
    let sink = JsonFileSink::from_config(&config.output);

    let results = scraper.scrape_many(cli.urls.as_slice()).await;

    let mut failures = 0;
    for (url, result) in cli.urls.iter().zip(results) {
        match result {
            Ok(record) => {
                if let Err(e) = handle_record(&cli, &sink, &record) {
                    tracing::error!("Failed to save record for {}: {:#}", url, e);
                    failures += 1;
                }
            }
            Err(e) => {
                tracing::error!("Could not scrape {}: {}", url, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} pages failed", failures, cli.urls.len());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_scraper=info,warn"),
            1 => EnvFilter::new("page_scraper=debug,info"),
            2 => EnvFilter::new("page_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints or saves one scraped record
fn handle_record(cli: &Cli, sink: &JsonFileSink, record: &PageRecord) -> anyhow::Result<()> {
    if cli.stdout {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    if !cli.quiet {
        print_record_summary(record);
    }

    let name = match &cli.output {
        Some(name) => name.clone(),
        None if cli.urls.len() == 1 => DEFAULT_FILE_NAME.to_string(),
        None => default_file_name(&record.source_url),
    };

    let path = sink.write_record(record, &name)?;
    if !cli.quiet {
        println!("\n✓ Saved to: {}\n", path.display());
    }

    Ok(())
}
