//! Scrape coordinator - fan-out over catalogue entries and fan-in of products
//!
//! This module contains the orchestration logic for a scrape run:
//! - Discovering every entry on the catalogue page up front
//! - Launching exactly one task per entry
//! - Receiving exactly one result per task
//! - Building the final report

use crate::config::Config;
use crate::crawler::fetcher::{DocumentFetcher, HttpFetcher};
use crate::crawler::parser::{discover_entries, CatalogueSelectors};
use crate::crawler::product::ProductScraper;
use crate::model::{Document, Product};
use crate::output::Report;
use crate::ScrapeError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Options controlling the fan-out
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Upper bound on each scrape task; unbounded when `None`
    pub task_timeout: Option<Duration>,
}

impl CollectOptions {
    /// Reads the options from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            task_timeout: config.scrape.task_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Scrapes every product listed on the catalogue page
///
/// Entries are enumerated before any task starts, so exactly `N` tasks are
/// launched and exactly `N` results are awaited. Products are returned in
/// completion order. The first failure aborts all outstanding tasks.
///
/// # Errors
///
/// * Entry discovery failures (missing or unresolvable links)
/// * The first error any scrape task reports
/// * [`ScrapeError::TaskLost`] if a task ends without reporting
pub async fn collect_all(
    root: &Document,
    scraper: Arc<ProductScraper>,
    selectors: &CatalogueSelectors,
    options: CollectOptions,
) -> Result<Vec<Product>, ScrapeError> {
    let entries = discover_entries(root, selectors)?;
    let expected = entries.len();
    tracing::info!("Found {} catalogue entries on {}", expected, root.url());

    if expected == 0 {
        return Ok(Vec::new());
    }

    let (tx, mut rx) = mpsc::channel::<Result<Product, ScrapeError>>(expected);
    let mut tasks = JoinSet::new();

    for entry in entries {
        let tx = tx.clone();
        let scraper = Arc::clone(&scraper);

        tasks.spawn(async move {
            let result = match options.task_timeout {
                Some(limit) => {
                    let url = entry.link.clone();
                    tokio::time::timeout(limit, scraper.scrape(entry))
                        .await
                        .unwrap_or_else(|_| Err(ScrapeError::Timeout { url }))
                }
                None => scraper.scrape(entry).await,
            };

            // Capacity equals the task count, so this never waits
            let _ = tx.send(result).await;
        });
    }

    // Only the tasks hold senders now
    drop(tx);

    let mut products = Vec::with_capacity(expected);
    while products.len() < expected {
        match rx.recv().await {
            Some(Ok(product)) => products.push(product),
            Some(Err(e)) => {
                tracing::error!("Scrape task failed: {}", e);
                tasks.abort_all();
                return Err(e);
            }
            None => {
                return Err(ScrapeError::TaskLost {
                    expected,
                    received: products.len(),
                });
            }
        }
    }

    Ok(products)
}

/// Runs a complete scrape with the given fetcher
///
/// Fetches the catalogue, collects every product and renders the report.
pub async fn scrape_catalogue(
    config: &Config,
    fetcher: Arc<dyn DocumentFetcher>,
) -> Result<Report, ScrapeError> {
    let start_time = Instant::now();
    let selectors = CatalogueSelectors::from_config(&config.catalogue)?;

    tracing::info!("Fetching catalogue {}", config.catalogue.url);
    let root = fetcher.fetch(&config.catalogue.url).await?;

    let scraper = Arc::new(ProductScraper::with_fetcher(fetcher));
    let options = CollectOptions::from_config(config);
    let products = collect_all(&root, scraper, &selectors, options).await?;

    let report = Report::render(&products);
    tracing::info!(
        "Scraped {} products in {:?}",
        report.results.len(),
        start_time.elapsed()
    );

    Ok(report)
}

/// Runs a complete scrape over HTTP
///
/// # Example
///
/// ```no_run
/// use catalogue_scraper::{run_scrape, Config};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_scrape(&Config::default()).await?;
/// print!("{}", report.to_json()?);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<Report, ScrapeError> {
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)?;
    scrape_catalogue(config, Arc::new(fetcher)).await
}
