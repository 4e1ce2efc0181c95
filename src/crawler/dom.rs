//! Thin DOM access layer over the `scraper` crate
//!
//! The extraction code only needs to parse a document, select elements by
//! CSS selector, and read attributes and text.

use crate::ParseError;
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document; malformed markup is repaired, never rejected
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Returns every element matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, ParseError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Returns the first element matching `selector`
    pub fn find(&self, selector: &str) -> Result<Option<ElementRef<'_>>, ParseError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).next())
    }
}

/// Compiles a CSS selector
pub fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Returns every descendant of `element` matching `selector`
pub fn find_all_in<'a>(
    element: ElementRef<'a>,
    selector: &str,
) -> Result<Vec<ElementRef<'a>>, ParseError> {
    let selector = compile(selector)?;
    Ok(element.select(&selector).collect())
}

/// Returns the first descendant of `element` matching `selector`
pub fn find_in<'a>(
    element: ElementRef<'a>,
    selector: &str,
) -> Result<Option<ElementRef<'a>>, ParseError> {
    let selector = compile(selector)?;
    Ok(element.select(&selector).next())
}

/// Reads an attribute value
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Concatenated text content with surrounding whitespace trimmed
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text content with every text node trimmed before joining
///
/// `<a> Herbs <span>,</span></a>` reads as `"Herbs,"`.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}
