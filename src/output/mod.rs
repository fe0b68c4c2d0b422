//! Output module for rendering scrape results
//!
//! This module handles:
//! - Display formatting of prices and page sizes
//! - Building the report from scraped products
//! - Serializing the report as JSON

mod format;
mod report;

pub use format::{format_price, format_size, round_to_one_decimal};
pub use report::{total_price, PriceToken, ProductDisplay, Report};
