use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the scheme+host origin of a URL
///
/// Given `"https://minebotanicals.com/collections"`, returns
/// `"https://minebotanicals.com/"`. Storefront links are site-relative, so the
/// origin is the base they resolve against.
///
/// # Examples
///
/// ```
/// use catalog_harvester::url::extract_origin;
///
/// let origin = extract_origin("https://shop.example.com/collections/all").unwrap();
/// assert_eq!(origin.as_str(), "https://shop.example.com/");
/// ```
pub fn extract_origin(url_str: &str) -> UrlResult<Url> {
    let url = parse_http_url(url_str)?;
    let origin = url.origin().ascii_serialization();
    Url::parse(&origin).map_err(|e| UrlError::Parse(e.to_string()))
}

/// Parses a URL and rejects anything that is not HTTP(S)
pub fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}
