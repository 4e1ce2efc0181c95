//! Product page parsing
//!
//! A product page carries its data twice: as an embedded JavaScript record
//! (`var json_product = {...};`) with the catalog fields, and as breadcrumb
//! markup with the categories. [`ProductDetailParser`] reads both and builds
//! the normalized [`ProductRecord`].

use crate::catalog::{clean_category, normalize_product, ProductRecord, RawProduct};
use crate::config::SelectorConfig;
use crate::crawler::dom::{self, Document};
use crate::ParseError;
use regex::Regex;
use serde_json::Value;

/// Parses product pages into normalized records
#[derive(Debug, Clone)]
pub struct ProductDetailParser {
    marker: Regex,
    category_container: String,
    category_link: String,
}

impl ProductDetailParser {
    /// Creates a parser for the given markup selectors
    ///
    /// The category selectors are compiled once here so that a bad selector
    /// fails at construction instead of on every product.
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ParseError> {
        dom::compile(&selectors.category_container)?;
        dom::compile(&selectors.category_link)?;

        Ok(Self {
            marker: record_marker(&selectors.embedded_record_variable)?,
            category_container: selectors.category_container.clone(),
            category_link: selectors.category_link.clone(),
        })
    }

    /// Parses one product page
    ///
    /// # Returns
    ///
    /// * `Ok(ProductRecord)` - The normalized product
    /// * `Err(ParseError::NullRecord)` - No script assigns the record variable
    /// * `Err(ParseError::MalformedRecord)` - The record is not a JSON object
    /// * `Err(ParseError::StructureError)` - The category markup is absent
    pub fn parse(&self, body: &str) -> Result<ProductRecord, ParseError> {
        let document = Document::parse(body);

        let record = locate_embedded_record(&document, &self.marker)?;
        let raw: RawProduct = serde_json::from_value(record)
            .map_err(|source| ParseError::MalformedRecord { source })?;

        let categories = self.extract_categories(&document)?;

        Ok(normalize_product(raw, categories))
    }

    fn extract_categories(&self, document: &Document) -> Result<Vec<String>, ParseError> {
        let container =
            document
                .find(&self.category_container)?
                .ok_or_else(|| ParseError::StructureError {
                    selector: self.category_container.clone(),
                })?;

        Ok(dom::find_all_in(container, &self.category_link)?
            .into_iter()
            .map(|link| clean_category(&dom::stripped_text(link)))
            .collect())
    }
}

/// Builds the pattern matching `var <variable> =`
fn record_marker(variable: &str) -> Result<Regex, ParseError> {
    let pattern = format!(r"\bvar\s+{}\s*=", regex::escape(variable));
    Ok(Regex::new(&pattern)?)
}

/// Finds the embedded record in the page's script blocks
///
/// Only the first script containing the marker is considered. The object
/// literal starts at the first `{` after the marker.
pub fn locate_embedded_record(document: &Document, marker: &Regex) -> Result<Value, ParseError> {
    for script in document.find_all("script")? {
        let source: String = script.text().collect();
        let Some(found) = marker.find(&source) else {
            continue;
        };

        let rest = &source[found.end()..];
        let literal = rest
            .find('{')
            .map(|start| &rest[start..])
            .map(|tail| extract_balanced_object(tail).unwrap_or(tail))
            .unwrap_or(rest);

        return serde_json::from_str(literal)
            .map_err(|source| ParseError::MalformedRecord { source });
    }

    Err(ParseError::NullRecord)
}

/// Returns the shortest prefix of `s` forming a complete `{...}` object
///
/// Brace depth is tracked outside string literals only, honoring escape
/// sequences. `None` if `s` does not start with `{` or never closes.
pub fn extract_balanced_object(s: &str) -> Option<&str> {
    if !s.starts_with('{') {
        return None;
    }

    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            ']' => depth -= 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
