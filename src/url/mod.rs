//! URL handling module for Catalog Harvester
//!
//! This module provides origin extraction, link resolution and listing page
//! URL construction.

mod origin;
mod pagination;
mod resolve;

// Re-export main functions
pub use origin::{extract_origin, parse_http_url};
pub use pagination::listing_page_url;
pub use resolve::resolve_link;

use crate::config::SiteConfig;
use crate::UrlResult;
use url::Url;

/// Returns the base URL that site links are resolved against
///
/// The configured `base-url` wins; otherwise the origin of `root-url` is used.
pub fn site_base_url(site: &SiteConfig) -> UrlResult<Url> {
    match &site.base_url {
        Some(base) => parse_http_url(base),
        None => extract_origin(&site.root_url),
    }
}
