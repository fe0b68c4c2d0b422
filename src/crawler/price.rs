//! Unit price extraction from free text

use crate::ScrapeError;
use regex::Regex;
use std::sync::OnceLock;

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.\d+").expect("decimal regex is valid"))
}

/// Extracts the first decimal number from price text
///
/// Only the first `digits.digits` run is considered; currency symbols and
/// unit suffixes around it are ignored.
///
/// # Returns
///
/// * `Ok(0.0)` - No decimal number in the text
/// * `Ok(price)` - The first decimal number found
/// * `Err(ScrapeError::PriceParse)` - The matched text could not be converted
///   to a finite number
///
/// # Example
///
/// ```
/// use catalogue_scraper::crawler::parse_price;
///
/// assert_eq!(parse_price("\n£1.50/unit\n").unwrap(), 1.50);
/// assert_eq!(parse_price("free").unwrap(), 0.0);
/// ```
pub fn parse_price(raw: &str) -> Result<f64, ScrapeError> {
    let Some(found) = decimal_pattern().find(raw) else {
        return Ok(0.0);
    };

    let price = found
        .as_str()
        .parse::<f64>()
        .map_err(|e| ScrapeError::PriceParse {
            raw: found.as_str().to_string(),
            reason: e.to_string(),
        })?;

    // Digit runs past f64 range parse to infinity
    if !price.is_finite() {
        return Err(ScrapeError::PriceParse {
            raw: found.as_str().to_string(),
            reason: "value is out of range".to_string(),
        });
    }

    Ok(price)
}
