//! Document fetching and product page reading
//!
//! This module defines the two injectable capabilities the scraper depends on:
//! - [`DocumentFetcher`]: turns an address into a [`Document`]
//! - [`PageReader`]: turns an address into [`PageFields`] using a fetcher
//!
//! Production code uses [`HttpFetcher`]; tests substitute an
//! [`InMemoryFetcher`] or a plain closure and never touch the network.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::crawler::parser::extract_fields;
use crate::model::{Document, PageFields};
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Retrieves documents by address
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the document at `url`
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError>;
}

/// Any synchronous `Fn(&str) -> Result<Document>` is a fetcher
#[async_trait]
impl<F> DocumentFetcher for F
where
    F: Fn(&str) -> Result<Document, ScrapeError> + Send + Sync,
{
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        self(url)
    }
}

/// Reads the size and description of a product page
#[async_trait]
pub trait PageReader: Send + Sync {
    /// Reads the page at `url`, retrieving it through `fetcher`
    async fn read_page(
        &self,
        url: &str,
        fetcher: &dyn DocumentFetcher,
    ) -> Result<PageFields, ScrapeError>;
}

/// The standard page reader: fetch, parse, then extract fields
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPageReader;

#[async_trait]
impl PageReader for ProductPageReader {
    async fn read_page(
        &self,
        url: &str,
        fetcher: &dyn DocumentFetcher,
    ) -> Result<PageFields, ScrapeError> {
        let document = fetcher.fetch(url).await?;
        let fields = extract_fields(&document.parse());

        if fields.description.is_empty() {
            tracing::warn!("No description meta tag on {}", url);
        }
        tracing::debug!("Read {} ({} bytes serialized)", url, fields.size_bytes);

        Ok(fields)
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// # Example
///
/// ```no_run
/// use catalogue_scraper::config::{HttpConfig, UserAgentConfig};
/// use catalogue_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches documents over HTTP(S)
///
/// Any transport error or non-success status fails the fetch. There is no
/// retry. Redirects are followed and the returned document carries the
/// final address.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from configuration
    pub fn from_config(user_agent: &UserAgentConfig, http: &HttpConfig) -> Result<Self, ScrapeError> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ScrapeError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Relative links resolve against where redirects ended up
        let final_url = response.url().to_string();
        if final_url != url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.text().await.map_err(|e| ScrapeError::Http {
            url: url.to_string(),
            source: e,
        })?;

        Ok(Document::new(final_url, body))
    }
}

/// Serves documents from memory, keyed by address
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    pages: HashMap<String, String>,
}

impl InMemoryFetcher {
    /// Creates an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, replacing any previous page at the same address
    pub fn with_page(mut self, url: impl Into<String>, source: impl Into<String>) -> Self {
        self.pages.insert(url.into(), source.into());
        self
    }
}

#[async_trait]
impl DocumentFetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        self.pages
            .get(url)
            .map(|source| Document::new(url, source.as_str()))
            .ok_or_else(|| ScrapeError::DocumentNotFound {
                url: url.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PRODUCT_PAGE: &str = "<html><head><title>Apricot Ripe</title>\
        <meta name=\"description\" content=\"Buy Sainsbury&#39;s!\"/>\
        <meta name=\"keyword\" content=\"blank\"/></head><body></body></html>";

    fn stub_fetcher(url: &str) -> Result<Document, ScrapeError> {
        Ok(Document::new(url, PRODUCT_PAGE))
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_read_page_with_function_fetcher() {
        let fields = ProductPageReader
            .read_page("", &stub_fetcher)
            .await
            .unwrap();

        let expected_size = Html::parse_document(PRODUCT_PAGE).html().len() as u64;
        assert_eq!(fields.size_bytes, expected_size);
        assert_eq!(fields.description, "Buy Sainsbury's!");
    }

    #[tokio::test]
    async fn test_read_page_propagates_fetch_failure() {
        let result = ProductPageReader
            .read_page("https://shop.example.com/missing", &InMemoryFetcher::new())
            .await;

        assert!(matches!(result, Err(ScrapeError::DocumentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_in_memory_fetcher() {
        let fetcher = InMemoryFetcher::new().with_page("https://a.test/", "<p>a</p>");

        let document = fetcher.fetch("https://a.test/").await.unwrap();
        assert_eq!(document.url(), "https://a.test/");
        assert_eq!(document.source(), "<p>a</p>");

        assert!(fetcher.fetch("https://b.test/").await.is_err());
    }
}
