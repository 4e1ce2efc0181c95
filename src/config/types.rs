use serde::Deserialize;
use std::path::Path;

/// Browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Catalog Harvester
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target storefront
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Collections index page the crawl starts from
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Base for resolving relative links (defaults to the origin of `root-url`)
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "https://minebotanicals.com/collections".to_string(),
            base_url: None,
        }
    }
}

/// Request identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    pub header: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause after each populated listing page (milliseconds)
    #[serde(default = "default_page_delay_ms", rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Request timeout; the transport default applies when unset
    #[serde(default, rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Skip products already harvested from an earlier collection
    #[serde(default, rename = "dedupe-products")]
    pub dedupe_products: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: default_page_delay_ms(),
            timeout_secs: None,
            dedupe_products: false,
        }
    }
}

fn default_page_delay_ms() -> u64 {
    2000
}

/// CSS selectors and markers describing the storefront theme
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// One tile per collection on the collections index
    pub collection_tile: String,
    /// Link inside a collection tile (its `href` is read)
    pub collection_link: String,
    /// Title element inside a collection tile
    pub collection_title: String,
    /// One item per product on a listing page
    pub product_item: String,
    /// Link inside a product item (its `href` is read)
    pub product_link: String,
    /// Breadcrumb element holding the product categories
    pub category_container: String,
    /// Category links inside the breadcrumb element
    pub category_link: String,
    /// Script variable the product record is assigned to
    pub embedded_record_variable: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            collection_tile: "div.collection-grid-item".to_string(),
            collection_link: "a.collection-grid-item__link".to_string(),
            collection_title: "div.collection-grid-item__title".to_string(),
            product_item: "div.item-product".to_string(),
            product_link: "a".to_string(),
            category_container: r#"p.product-single__cat[itemprop="cat"]"#.to_string(),
            category_link: "a".to_string(),
            embedded_record_variable: "json_product".to_string(),
        }
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the exported table
    pub path: String,

    /// Explicit format; inferred from the file extension when unset
    pub format: Option<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "minebotanicals_products.csv".to_string(),
            format: None,
        }
    }
}

impl OutputConfig {
    /// Returns the effective export format
    ///
    /// A `.json` extension selects JSON; everything else is CSV.
    pub fn resolved_format(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        match Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}
