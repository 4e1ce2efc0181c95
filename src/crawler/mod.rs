//! Crawler module for catalog fetching and extraction
//!
//! This module contains the harvest pipeline, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - DOM access and per-page extractors
//! - Collection enumeration with listing pagination
//! - Overall crawl coordination

mod coordinator;
pub mod dom;
mod enumerator;
mod fetcher;
mod listing;
mod politeness;
mod product;

pub use coordinator::CatalogCrawler;
pub use enumerator::{CollectionEnumerator, CollectionHarvest, LinkFilter};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use listing::{extract_collections, extract_product_links};
pub use politeness::{FixedDelay, NoDelay, Politeness};
pub use product::{extract_balanced_object, locate_embedded_record, ProductDetailParser};

use crate::config::Config;
use crate::output::{export_products, HarvestStats};
use crate::Result;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP fetcher and pacing policy
/// 2. Discover the site's collections
/// 3. Enumerate every collection and parse its products
/// 4. Export the catalog to the configured file
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(HarvestStats)` - Harvest and export completed
/// * `Err(HarvestError)` - The run was aborted
///
/// # Example
///
/// ```no_run
/// use catalog_harvester::config::load_config;
/// use catalog_harvester::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let stats = run_harvest(&config).await?;
/// println!("{} products", stats.products_harvested);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config) -> Result<HarvestStats> {
    let mut crawler = CatalogCrawler::from_config(config)?;
    let products = crawler.crawl(&config.site.root_url).await?;

    export_products(&products, &config.output)?;

    Ok(crawler.stats().clone())
}
