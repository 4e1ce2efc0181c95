//! Catalog Harvester: a paginated storefront catalog extractor
//!
//! This crate discovers the collections of an e-commerce storefront, walks the
//! paginated listings of each collection, extracts the structured product
//! record embedded in every product page and exports the normalized catalog
//! to a tabular file.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),
}

/// Transport-level failures while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failures while extracting data from a fetched document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No embedded product record found in any script block")]
    NullRecord,

    #[error("Embedded product record is not valid JSON: {source}")]
    MalformedRecord {
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected markup '{selector}' is absent")]
    StructureError { selector: String },

    #[error("{element} is missing its {field}")]
    MissingField {
        element: &'static str,
        field: &'static str,
    },

    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid record marker pattern: {0}")]
    Pattern(#[from] regex::Error),
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

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use catalog::{CollectionRef, NormalizedVariant, ProductRecord};
pub use config::Config;
pub use crawler::{run_harvest, CatalogCrawler, CollectionEnumerator, ProductDetailParser};
