//! Normalization from embedded product records to [`ProductRecord`]s.

use crate::catalog::types::{NormalizedVariant, ProductRecord, RawProduct, RawVariant};

/// Renders an amount in minor currency units with exactly two decimals
///
/// Integer arithmetic keeps the result exact for every input.
///
/// # Examples
///
/// ```
/// use catalog_harvester::catalog::format_minor_units;
///
/// assert_eq!(format_minor_units(12345), "123.45");
/// assert_eq!(format_minor_units(5), "0.05");
/// assert_eq!(format_minor_units(0), "0.00");
/// ```
pub fn format_minor_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Cleans one breadcrumb category entry
///
/// Surrounding whitespace and a single trailing comma are removed:
/// `"Herbs, "` becomes `"Herbs"`.
pub fn clean_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    trimmed.trim_end().to_string()
}

/// Projects a raw variant onto the tracked fields and formats its price
pub fn normalize_variant(variant: RawVariant) -> NormalizedVariant {
    NormalizedVariant {
        title: variant.title,
        sku: variant.sku,
        public_title: variant.public_title,
        options: variant.options,
        price: format_minor_units(variant.price),
        weight: variant.weight,
    }
}

/// Builds the exported record from an embedded product and its categories
///
/// `categories` are taken as-is; callers clean them with [`clean_category`]
/// while reading the breadcrumb markup.
pub fn normalize_product(raw: RawProduct, categories: Vec<String>) -> ProductRecord {
    ProductRecord {
        title: raw.title,
        description: raw.description,
        vendor: raw.vendor,
        product_type: raw.product_type,
        categories,
        tags: raw.tags,
        price: format_minor_units(raw.price),
        price_min: format_minor_units(raw.price_min),
        price_max: format_minor_units(raw.price_max),
        variants: raw.variants.into_iter().map(normalize_variant).collect(),
        images: raw.images,
        featured_image: raw.featured_image,
        content: raw.content,
    }
}
