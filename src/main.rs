//! Catalogue scraper entry point
//!
//! Scrapes the configured catalogue and writes the JSON report to stdout.
//! Logs go to stderr.

use anyhow::Context;
use catalogue_scraper::config::{load_config_with_hash, validate, Config};
use catalogue_scraper::run_scrape;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalogue Scraper: concurrent product catalogue reporting
///
/// Fetches a product catalogue page, scrapes every linked product page
/// concurrently, and prints a JSON report with the total unit price.
#[derive(Parser, Debug)]
#[command(name = "catalogue-scraper")]
#[command(version)]
#[command(about = "Scrapes a product catalogue into a JSON report", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Catalogue URL, overriding the configured one
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = cli.url {
        config.catalogue.url = url;
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs are written to stderr; stdout is reserved for the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalogue_scraper=info,warn"),
            1 => EnvFilter::new("catalogue_scraper=debug,info"),
            2 => EnvFilter::new("catalogue_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Catalogue Scraper Dry Run ===\n");

    println!("Catalogue:");
    println!("  URL: {}", config.catalogue.url);
    println!("  Entry selector: {}", config.catalogue.entry_selector);
    println!("  Link selector: {}", config.catalogue.link_selector);
    println!("  Price selector: {}", config.catalogue.price_selector);

    println!("\nHTTP:");
    println!("  User agent: {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    match config.scrape.task_timeout_secs {
        Some(secs) => println!("  Task timeout: {}s", secs),
        None => println!("  Task timeout: none"),
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the scrape and writes the report to stdout
///
/// Nothing is written to stdout unless the whole scrape succeeds.
async fn handle_scrape(config: &Config) -> anyhow::Result<()> {
    let report = match run_scrape(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    let json = report.to_json().context("failed to serialize report")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(json.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write report")?;

    Ok(())
}
