//! Harvest coordinator - top-level crawl orchestration
//!
//! This module contains the crawl that ties the pipeline together:
//! - Fetching the collections index and discovering collections
//! - Enumerating each collection in discovery order
//! - Applying run-wide product deduplication when enabled
//! - Recording harvest statistics

use crate::catalog::{CollectionRef, ProductRecord};
use crate::config::{Config, SelectorConfig};
use crate::crawler::enumerator::{CollectionEnumerator, LinkFilter};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::listing::extract_collections;
use crate::crawler::politeness::{FixedDelay, Politeness};
use crate::crawler::product::ProductDetailParser;
use crate::output::HarvestStats;
use crate::url::site_base_url;
use crate::Result;
use std::time::Instant;
use url::Url;

/// Crawls a storefront's whole catalog
pub struct CatalogCrawler {
    fetcher: Box<dyn PageFetcher>,
    politeness: Box<dyn Politeness>,
    parser: ProductDetailParser,
    selectors: SelectorConfig,
    base_url: Url,
    dedupe: bool,
    stats: HarvestStats,
}

impl CatalogCrawler {
    /// Creates a crawler with explicit fetcher and pacing policy
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `fetcher` - Source of page bodies
    /// * `politeness` - Pacing between listing pages
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogCrawler)` - Ready to crawl
    /// * `Err(HarvestError)` - The base URL or a selector is invalid
    pub fn new(
        config: &Config,
        fetcher: Box<dyn PageFetcher>,
        politeness: Box<dyn Politeness>,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            politeness,
            parser: ProductDetailParser::new(&config.selectors)?,
            selectors: config.selectors.clone(),
            base_url: site_base_url(&config.site)?,
            dedupe: config.crawler.dedupe_products,
            stats: HarvestStats::new(),
        })
    }

    /// Creates a crawler that fetches over HTTP with the configured delay
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        let politeness = FixedDelay::from_millis(config.crawler.page_delay_ms);
        tracing::debug!("Pausing {:?} between listing pages", politeness.delay());
        Self::new(config, Box::new(fetcher), Box::new(politeness))
    }

    /// Returns the statistics collected so far
    pub fn stats(&self) -> &HarvestStats {
        &self.stats
    }

    /// Fetches the collections index and returns its collections in page order
    ///
    /// Tiles missing their link or title are logged and skipped. Failing to
    /// fetch the index itself is an error.
    pub async fn discover_collections(&mut self, root_url: &str) -> Result<Vec<CollectionRef>> {
        let body = self.fetcher.fetch(root_url).await?;

        let mut collections = Vec::new();
        for entry in extract_collections(&body, &self.base_url, &self.selectors)? {
            match entry {
                Ok(collection) => collections.push(collection),
                Err(e) => {
                    tracing::warn!("Error processing collection: {}", e);
                    self.stats.collections_skipped += 1;
                }
            }
        }

        self.stats.collections_discovered += collections.len() as u64;
        tracing::info!("Found {} collections on {}", collections.len(), root_url);
        Ok(collections)
    }

    /// Harvests every product of every collection reachable from `root_url`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProductRecord>)` - Products grouped by collection, in
    ///   discovery order
    /// * `Err(HarvestError)` - The index could not be fetched, or a listing
    ///   page failed at the transport layer
    pub async fn crawl(&mut self, root_url: &str) -> Result<Vec<ProductRecord>> {
        let started = Instant::now();
        let started_at = chrono::Local::now();
        self.stats.started_at = Some(started_at);
        tracing::info!("Starting scraping at {}", started_at.format("%Y-%m-%d %H:%M:%S"));

        let collections = self.discover_collections(root_url).await?;

        let mut filter = if self.dedupe {
            LinkFilter::dedupe()
        } else {
            LinkFilter::allow_all()
        };
        if filter.is_deduplicating() {
            tracing::info!("Products listed in several collections are harvested once");
        }

        let mut products = Vec::new();
        for collection in &collections {
            tracing::info!("Scraping collection: {} ({})", collection.title, collection.url);
            let collection_started = Instant::now();

            let harvest = self
                .enumerator()
                .enumerate_with(&collection.url, &mut filter)
                .await?;

            tracing::info!(
                "Total products scraped from collection {}: {}",
                collection.title,
                harvest.products.len()
            );
            tracing::info!(
                "Time taken to scrape collection {}: {:.2} seconds",
                collection.url,
                collection_started.elapsed().as_secs_f64()
            );

            self.stats.listing_pages_fetched += u64::from(harvest.pages_fetched);
            self.stats.products_harvested += harvest.products.len() as u64;
            self.stats.products_skipped += u64::from(harvest.products_skipped);
            self.stats.duplicates_skipped += u64::from(harvest.duplicates_skipped);
            products.extend(harvest.products);
        }

        self.stats.elapsed = started.elapsed();
        tracing::info!(
            "Harvested {} products from {} collections in {:.2} seconds",
            products.len(),
            collections.len(),
            self.stats.elapsed.as_secs_f64()
        );

        Ok(products)
    }

    fn enumerator(&self) -> CollectionEnumerator<'_> {
        CollectionEnumerator::new(
            self.fetcher.as_ref(),
            self.politeness.as_ref(),
            &self.parser,
            &self.selectors,
            &self.base_url,
        )
    }
}
