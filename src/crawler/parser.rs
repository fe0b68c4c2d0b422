//! HTML parser for catalogue entries and product page fields
//!
//! This module handles parsing HTML content to extract:
//! - Product entries from the catalogue page (title, link, price text)
//! - Page size and description from product pages

use crate::config::{validate_selector, CatalogueConfig};
use crate::model::{CatalogueEntry, Document, PageFields};
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

fn description_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Selector::parse(r#"meta[name="description"]"#).expect("description selector is valid")
    })
}

/// Compiled selectors used to read the catalogue page
#[derive(Debug, Clone)]
pub struct CatalogueSelectors {
    /// Matches one node per product entry
    pub entry: Selector,

    /// Matches the product link inside an entry
    pub link: Selector,

    /// Matches the per-unit price text inside an entry
    pub price: Selector,
}

impl CatalogueSelectors {
    /// Compiles the selectors named in the catalogue configuration
    pub fn from_config(config: &CatalogueConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            entry: validate_selector(&config.entry_selector)?,
            link: validate_selector(&config.link_selector)?,
            price: validate_selector(&config.price_selector)?,
        })
    }
}

impl Default for CatalogueSelectors {
    fn default() -> Self {
        // The default configuration only holds known-good selectors
        Self::from_config(&CatalogueConfig::default()).expect("default selectors are valid")
    }
}

/// Enumerates every product entry on the catalogue page in document order
///
/// The parsed tree is dropped before returning, so the result can be moved
/// freely across tasks.
///
/// # Errors
///
/// Fails if any entry lacks a link or its link cannot be resolved against
/// the catalogue address.
pub fn discover_entries(
    root: &Document,
    selectors: &CatalogueSelectors,
) -> Result<Vec<CatalogueEntry>, ScrapeError> {
    let base_url = Url::parse(root.url())?;
    let html = root.parse();

    html.select(&selectors.entry)
        .map(|element| read_entry(element, selectors, &base_url))
        .collect()
}

/// Reads one catalogue entry node
///
/// The title is the trimmed text of the first link, the link is its `href`
/// resolved against `base_url`, and the price text is the concatenated text
/// of every price element in the entry.
pub fn read_entry(
    element: ElementRef<'_>,
    selectors: &CatalogueSelectors,
    base_url: &Url,
) -> Result<CatalogueEntry, ScrapeError> {
    let link = element.select(&selectors.link).next();

    let title = link
        .map(|a| a.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let href = link
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| ScrapeError::MissingLink {
            title: title.clone(),
        })?;

    let raw_price = element
        .select(&selectors.price)
        .flat_map(|price| price.text())
        .collect::<String>();

    Ok(CatalogueEntry {
        link: resolve_link(href, base_url)?,
        title,
        raw_price,
    })
}

/// Resolves a link href to an absolute URL
///
/// Absolute hrefs are returned unchanged apart from normalization.
fn resolve_link(href: &str, base_url: &Url) -> Result<String, ScrapeError> {
    base_url
        .join(href.trim())
        .map(|url| url.to_string())
        .map_err(|source| ScrapeError::InvalidLink {
            href: href.to_string(),
            base: base_url.to_string(),
            source,
        })
}

/// Extracts the page size and description from a product page
///
/// `size_bytes` is the length of the tree serialized back to HTML, which can
/// differ from the bytes received. The description comes from the first
/// `<meta name="description">` in document order and is empty when none
/// exists.
pub fn extract_fields(document: &Html) -> PageFields {
    let size_bytes = document.html().len() as u64;

    PageFields {
        size_bytes,
        description: extract_description(document).unwrap_or_default(),
    }
}

/// Extracts the content of the first description meta tag
fn extract_description(document: &Html) -> Option<String> {
    document
        .select(description_selector())
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}
