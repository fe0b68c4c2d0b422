//! Configuration module for the catalogue scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; the defaults describe the fixed product catalogue.
//!
//! # Example
//!
//! ```no_run
//! use catalogue_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Scraping catalogue at: {}", config.catalogue.url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogueConfig, Config, HttpConfig, ScrapeConfig, UserAgentConfig, DEFAULT_CATALOGUE_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

pub(crate) use validation::validate_selector;
