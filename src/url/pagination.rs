use crate::url::parse_http_url;
use crate::UrlResult;
use url::Url;

/// Builds the URL of one listing page of a collection
///
/// The `page` query parameter is set (or replaced) while any other query
/// parameters of the collection URL are kept. Page numbers start at 1.
///
/// # Examples
///
/// ```
/// use catalog_harvester::url::listing_page_url;
///
/// let url = listing_page_url("https://shop.example.com/collections/teas", 2).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/collections/teas?page=2");
/// ```
pub fn listing_page_url(collection_url: &str, page: u32) -> UrlResult<Url> {
    let mut url = parse_http_url(collection_url)?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("page", &page.to_string());
    }

    Ok(url)
}
