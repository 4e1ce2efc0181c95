//! Extraction from the collections index and collection listing pages
//!
//! Both extractors work per item: a tile or listing entry that lacks the
//! expected markup yields an `Err` for that item only, so callers can log
//! and skip it while keeping the rest of the page.

use crate::catalog::CollectionRef;
use crate::config::SelectorConfig;
use crate::crawler::dom::{self, Document};
use crate::url::resolve_link;
use crate::ParseError;
use url::Url;

/// Extracts the collection tiles of the collections index page
///
/// # Arguments
///
/// * `body` - HTML of the collections index
/// * `base_url` - Base URL for resolving tile links
/// * `selectors` - Markup selectors
///
/// # Returns
///
/// One entry per tile, in page order. A tile without a usable link or title
/// is `Err(ParseError::MissingField)`.
pub fn extract_collections(
    body: &str,
    base_url: &Url,
    selectors: &SelectorConfig,
) -> Result<Vec<Result<CollectionRef, ParseError>>, ParseError> {
    let document = Document::parse(body);
    let tiles = document.find_all(&selectors.collection_tile)?;

    let mut collections = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let href = dom::find_in(tile, &selectors.collection_link)?
            .and_then(|link| dom::attribute(link, "href"));
        let title = dom::find_in(tile, &selectors.collection_title)?.map(dom::text);

        let entry = match (href.and_then(|h| resolve_link(h, base_url)), title) {
            (None, _) => Err(ParseError::MissingField {
                element: "collection tile",
                field: "link",
            }),
            (Some(_), None) => Err(ParseError::MissingField {
                element: "collection tile",
                field: "title",
            }),
            (Some(url), Some(title)) => Ok(CollectionRef { title, url }),
        };
        collections.push(entry);
    }

    Ok(collections)
}

/// Extracts the absolute product URLs of one listing page
///
/// The outer `Vec` has one entry per product item on the page, so an empty
/// result means the page lists no products at all.
pub fn extract_product_links(
    body: &str,
    base_url: &Url,
    selectors: &SelectorConfig,
) -> Result<Vec<Result<String, ParseError>>, ParseError> {
    let document = Document::parse(body);
    let items = document.find_all(&selectors.product_item)?;

    let mut links = Vec::with_capacity(items.len());
    for item in items {
        let href = dom::find_in(item, &selectors.product_link)?
            .and_then(|link| dom::attribute(link, "href"));

        links.push(
            href.and_then(|h| resolve_link(h, base_url))
                .ok_or(ParseError::MissingField {
                    element: "product item",
                    field: "link",
                }),
        );
    }

    Ok(links)
}
