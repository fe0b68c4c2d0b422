//! Crawler module for catalogue and product page scraping
//!
//! This module contains the core scraping logic, including:
//! - Document fetching behind an injectable trait
//! - HTML parsing of catalogue entries and product pages
//! - Unit price extraction
//! - Concurrent fan-out over catalogue entries

mod coordinator;
mod fetcher;
mod parser;
mod price;
mod product;

pub use coordinator::{collect_all, run_scrape, scrape_catalogue, CollectOptions};
pub use fetcher::{
    build_http_client, DocumentFetcher, HttpFetcher, InMemoryFetcher, PageReader,
    ProductPageReader,
};
pub use parser::{discover_entries, extract_fields, read_entry, CatalogueSelectors};
pub use price::parse_price;
pub use product::{scrape_product, ProductScraper};
