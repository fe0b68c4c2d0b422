//! Core data types passed between the scraping stages

use scraper::Html;

/// A fetched page, kept as source text until it is parsed
///
/// Parsed [`Html`] trees are not `Send`, so documents travel between tasks
/// in this form and are parsed where they are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    source: String,
}

impl Document {
    /// Creates a document from the address it was fetched from and its body
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }

    /// The address this document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document body as received
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parses the body into an HTML tree
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.source)
    }
}

/// One product entry discovered on the catalogue page
///
/// Captured from the entry node before fan-out so each scrape task owns
/// everything it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    /// Link text, trimmed
    pub title: String,

    /// Absolute address of the product page
    pub link: String,

    /// Untouched per-unit price text, e.g. `"\n£3.50/unit\n"`
    pub raw_price: String,
}

/// Facts read from a product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    /// Byte length of the serialized page
    pub size_bytes: u64,

    /// Content of the description meta tag, empty if absent
    pub description: String,
}

/// A fully scraped product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub title: String,

    /// Price per unit, never negative
    pub unit_price: f64,

    /// Byte length of the product page's serialized HTML
    pub page_size: u64,

    pub description: String,
}
