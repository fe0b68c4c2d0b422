//! The scrape report and its JSON serialization

use crate::model::Product;
use crate::output::format::{format_price, format_size};
use crate::ScrapeError;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::value::RawValue;
use std::io::Write;

/// A price rendered for display, serialized as a bare JSON number
///
/// Keeps its trailing zeros in the output (`3.50`, not `3.5`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceToken(String);

impl PriceToken {
    pub fn new(price: f64) -> Self {
        Self(format_price(price))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for PriceToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawValue::from_string(self.0.clone())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Display projection of a [`Product`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDisplay {
    pub title: String,

    /// Page size as kilobytes, e.g. `"61.6kb"`
    pub size: String,

    pub unit_price: PriceToken,

    pub description: String,
}

impl From<&Product> for ProductDisplay {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            size: format_size(product.page_size),
            unit_price: PriceToken::new(product.unit_price),
            description: product.description.clone(),
        }
    }
}

/// The final report: every product plus the total unit price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub results: Vec<ProductDisplay>,
    pub total: PriceToken,
}

impl Report {
    /// Builds the report, keeping products in the order given
    ///
    /// The total is summed at full precision and rounded only for display.
    pub fn render(products: &[Product]) -> Self {
        Self {
            results: products.iter().map(ProductDisplay::from).collect(),
            total: PriceToken::new(total_price(products)),
        }
    }

    /// Writes the report as 4-space indented JSON followed by a newline
    ///
    /// `&`, `<` and `>` are written as-is.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<(), ScrapeError> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Serializes the report to a string, see [`Report::write_json`]
    pub fn to_json(&self) -> Result<String, ScrapeError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Sums unit prices without rounding
pub fn total_price(products: &[Product]) -> f64 {
    products.iter().map(|product| product.unit_price).sum()
}
