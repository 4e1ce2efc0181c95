//! Collection enumeration
//!
//! Walks the listing pages of one collection (`?page=1`, `?page=2`, ...)
//! until a page lists no products, parsing every product found on the way.
//! A listing page answered with a non-success status ends the collection the
//! same way an empty page does; transport failures abort the run.

use crate::catalog::ProductRecord;
use crate::config::SelectorConfig;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::extract_product_links;
use crate::crawler::politeness::Politeness;
use crate::crawler::product::ProductDetailParser;
use crate::url::listing_page_url;
use crate::{FetchError, Result};
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Decides which product URLs are harvested during a run
///
/// Without deduplication every URL is admitted, so a product listed in two
/// collections is exported twice. With deduplication a URL is only marked
/// once its product was harvested, so a product that failed in one
/// collection is tried again when another collection lists it.
#[derive(Debug, Default)]
pub struct LinkFilter {
    harvested: Option<HashSet<String>>,
}

impl LinkFilter {
    /// Admits every URL
    pub fn allow_all() -> Self {
        Self { harvested: None }
    }

    /// Admits each absolute URL once per run
    pub fn dedupe() -> Self {
        Self {
            harvested: Some(HashSet::new()),
        }
    }

    /// Returns true if the product at `url` should be fetched
    pub fn admits(&self, url: &str) -> bool {
        match &self.harvested {
            Some(harvested) => !harvested.contains(url),
            None => true,
        }
    }

    /// Records that the product at `url` was harvested
    pub fn mark_harvested(&mut self, url: &str) {
        if let Some(harvested) = &mut self.harvested {
            harvested.insert(url.to_string());
        }
    }

    pub fn is_deduplicating(&self) -> bool {
        self.harvested.is_some()
    }
}

/// Everything harvested from one collection
#[derive(Debug, Default)]
pub struct CollectionHarvest {
    /// Products in listing order
    pub products: Vec<ProductRecord>,
    /// Listing pages fetched, including the terminating empty page
    pub pages_fetched: u32,
    /// Products whose link, page or record could not be used
    pub products_skipped: u32,
    /// Products not fetched because an earlier collection had them
    pub duplicates_skipped: u32,
}

/// Enumerates the products of a collection
pub struct CollectionEnumerator<'a> {
    fetcher: &'a dyn PageFetcher,
    politeness: &'a dyn Politeness,
    parser: &'a ProductDetailParser,
    selectors: &'a SelectorConfig,
    base_url: &'a Url,
}

impl<'a> CollectionEnumerator<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        politeness: &'a dyn Politeness,
        parser: &'a ProductDetailParser,
        selectors: &'a SelectorConfig,
        base_url: &'a Url,
    ) -> Self {
        Self {
            fetcher,
            politeness,
            parser,
            selectors,
            base_url,
        }
    }

    /// Harvests every product of the collection at `collection_url`
    pub async fn enumerate(&self, collection_url: &str) -> Result<Vec<ProductRecord>> {
        let mut filter = LinkFilter::allow_all();
        Ok(self.enumerate_with(collection_url, &mut filter).await?.products)
    }

    /// Harvests the collection, consulting `filter` before each product fetch
    ///
    /// # Returns
    ///
    /// * `Ok(CollectionHarvest)` - Products plus page and skip counts
    /// * `Err(HarvestError)` - A listing page failed at the transport layer or
    ///   could not be read
    ///
    /// Failures of individual products are logged and counted, never
    /// returned.
    pub async fn enumerate_with(
        &self,
        collection_url: &str,
        filter: &mut LinkFilter,
    ) -> Result<CollectionHarvest> {
        let mut harvest = CollectionHarvest::default();
        let mut page: u32 = 1;

        loop {
            let page_url = listing_page_url(collection_url, page)?;
            tracing::info!("Scraping page {}: {}", page, page_url);

            let fetched = self.fetcher.fetch(page_url.as_str()).await;
            harvest.pages_fetched += 1;

            let body = match fetched {
                Ok(body) => body,
                Err(FetchError::Status { status, .. }) => {
                    tracing::warn!(
                        "Listing page {} answered HTTP {}, ending collection",
                        page_url,
                        status
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            let items = extract_product_links(&body, self.base_url, self.selectors)?;
            if items.is_empty() {
                tracing::debug!("Page {} lists no products, collection exhausted", page);
                break;
            }

            let mut harvested_on_page = 0usize;
            for item in items {
                let product_url = match item {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::warn!("Skipping product on {}: {}", page_url, e);
                        harvest.products_skipped += 1;
                        continue;
                    }
                };

                if !filter.admits(&product_url) {
                    tracing::debug!("Already harvested {}", product_url);
                    harvest.duplicates_skipped += 1;
                    continue;
                }

                match self.harvest_product(&product_url).await {
                    Ok(record) => {
                        filter.mark_harvested(&product_url);
                        harvest.products.push(record);
                        harvested_on_page += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Error processing product {}: {}", product_url, e);
                        harvest.products_skipped += 1;
                    }
                }
            }

            tracing::info!(
                "Total products scraped from page {}: {}",
                page,
                harvested_on_page
            );

            self.politeness.wait_between_requests().await;
            page += 1;
        }

        Ok(harvest)
    }

    async fn harvest_product(&self, product_url: &str) -> Result<ProductRecord> {
        let started = Instant::now();
        let body = self.fetcher.fetch(product_url).await?;
        let record = self.parser.parse(&body)?;
        tracing::debug!(
            "Parsed '{}' from {} in {:?}",
            record.title,
            product_url,
            started.elapsed()
        );
        Ok(record)
    }
}
