use serde::Deserialize;

/// Address of the fixed product catalogue scraped when no other is configured
pub const DEFAULT_CATALOGUE_URL: &str =
    "http://hiring-tests.s3-website-eu-west-1.amazonaws.com/2015_Developer_Scrape/5_products.html";

/// Main configuration structure for the catalogue scraper
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalogue: CatalogueConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// Where the catalogue lives and how its entries are recognised
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueConfig {
    /// Address of the root catalogue page
    #[serde(default = "default_catalogue_url")]
    pub url: String,

    /// CSS selector matching one node per product entry
    #[serde(rename = "entry-selector", default = "default_entry_selector")]
    pub entry_selector: String,

    /// CSS selector for the product link inside an entry
    #[serde(rename = "link-selector", default = "default_link_selector")]
    pub link_selector: String,

    /// CSS selector for the per-unit price text inside an entry
    #[serde(rename = "price-selector", default = "default_price_selector")]
    pub price_selector: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            url: default_catalogue_url(),
            entry_selector: default_entry_selector(),
            link_selector: default_link_selector(),
            price_selector: default_price_selector(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value as `name/version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// HTTP client timeouts
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Fan-out behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeConfig {
    /// Upper bound on a single product scrape, in seconds. Unbounded when unset.
    #[serde(rename = "task-timeout-secs", default)]
    pub task_timeout_secs: Option<u64>,
}

fn default_catalogue_url() -> String {
    DEFAULT_CATALOGUE_URL.to_string()
}

fn default_entry_selector() -> String {
    ".product".to_string()
}

fn default_link_selector() -> String {
    "a".to_string()
}

fn default_price_selector() -> String {
    ".pricePerUnit".to_string()
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
