//! Harvest statistics
//!
//! Counters collected by the crawler during a run and printed at the end.

use chrono::{DateTime, Local};
use std::time::Duration;

/// Harvest statistics summary
#[derive(Debug, Clone, Default)]
pub struct HarvestStats {
    /// When the crawl started
    pub started_at: Option<DateTime<Local>>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,

    /// Collection tiles that yielded a usable link and title
    pub collections_discovered: u64,

    /// Collection tiles skipped for missing markup
    pub collections_skipped: u64,

    /// Listing pages fetched, including each collection's final empty page
    pub listing_pages_fetched: u64,

    /// Products parsed successfully
    pub products_harvested: u64,

    /// Products skipped after a fetch or parse failure
    pub products_skipped: u64,

    /// Products not fetched again because another collection had them
    pub duplicates_skipped: u64,
}

impl HarvestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Products the crawler attempted, excluding duplicates
    pub fn products_attempted(&self) -> u64 {
        self.products_harvested + self.products_skipped
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.products_attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.products_harvested as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== Harvest Statistics ===\n");

    if let Some(started_at) = stats.started_at {
        println!("Started: {}", started_at.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("Duration: {:.2} seconds", stats.elapsed.as_secs_f64());
    println!();

    println!("Collections:");
    println!("  Discovered: {}", stats.collections_discovered);
    if stats.collections_skipped > 0 {
        println!("  Skipped: {}", stats.collections_skipped);
    }
    println!("  Listing pages fetched: {}", stats.listing_pages_fetched);
    println!();

    println!("Products:");
    println!("  Harvested: {}", stats.products_harvested);
    println!("  Skipped: {}", stats.products_skipped);
    if stats.duplicates_skipped > 0 {
        println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    }
    println!("  Success rate: {:.1}%", stats.success_rate());
}
