//! Per-entry product scraping

use crate::crawler::fetcher::{DocumentFetcher, PageReader, ProductPageReader};
use crate::crawler::price::parse_price;
use crate::model::{CatalogueEntry, Product};
use crate::ScrapeError;
use std::sync::Arc;

/// Scrapes one catalogue entry into a [`Product`]
///
/// The entry supplies the title and price text; `reader`, using `fetcher`,
/// supplies the page size and description of the linked page.
pub async fn scrape_product(
    entry: CatalogueEntry,
    reader: &dyn PageReader,
    fetcher: &dyn DocumentFetcher,
) -> Result<Product, ScrapeError> {
    let unit_price = parse_price(&entry.raw_price)?;
    let fields = reader.read_page(&entry.link, fetcher).await?;

    tracing::debug!("Scraped '{}' at {:.2}", entry.title, unit_price);

    Ok(Product {
        title: entry.title,
        unit_price,
        page_size: fields.size_bytes,
        description: fields.description,
    })
}

/// A product scraper bound to its collaborators
///
/// Cheap to share between tasks behind an `Arc`; holds no mutable state.
#[derive(Clone)]
pub struct ProductScraper {
    reader: Arc<dyn PageReader>,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl ProductScraper {
    /// Creates a scraper with an explicit page reader and fetcher
    pub fn new(reader: Arc<dyn PageReader>, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { reader, fetcher }
    }

    /// Creates a scraper using the standard [`ProductPageReader`]
    pub fn with_fetcher(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self::new(Arc::new(ProductPageReader), fetcher)
    }

    /// Scrapes one catalogue entry
    pub async fn scrape(&self, entry: CatalogueEntry) -> Result<Product, ScrapeError> {
        scrape_product(entry, self.reader.as_ref(), self.fetcher.as_ref()).await
    }
}
