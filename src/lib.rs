//! Catalogue Scraper: concurrent product catalogue reporting
//!
//! This crate fetches a catalogue page, scrapes every linked product page
//! concurrently, and renders the results as a deterministic JSON report.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for catalogue scraping operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid link '{href}' relative to {base}: {source}")]
    InvalidLink {
        href: String,
        base: String,
        source: ::url::ParseError,
    },

    #[error("Catalogue entry '{title}' has no product link")]
    MissingLink { title: String },

    #[error("Unparseable price '{raw}': {reason}")]
    PriceParse { raw: String, reason: String },

    #[error("No document available for {url}")]
    DocumentNotFound { url: String },

    #[error("Scrape task lost: expected {expected} results, received {received}")]
    TaskLost { expected: usize, received: usize },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, DocumentFetcher, HttpFetcher, InMemoryFetcher, PageReader};
pub use model::{CatalogueEntry, Document, PageFields, Product};
pub use output::{ProductDisplay, Report};
