//! Record types for collections and products
//!
//! ## Embedded record shape
//!
//! Storefront themes inline the product as a JavaScript object literal,
//! e.g. `var json_product = {"title": "Red Vein", "price": 999, ...};`.
//! Prices are integers in minor currency units. Fields are frequently
//! `null` or missing altogether, so every field of [`RawProduct`] and
//! [`RawVariant`] falls back to an empty value instead of failing the
//! whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A collection discovered on the collections index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRef {
    /// Display title of the collection tile
    pub title: String,

    /// Absolute URL of the collection's listing
    pub url: String,
}

/// Product record as embedded in a product page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub vendor: String,

    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub product_type: String,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price: i64,

    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price_min: i64,

    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price_max: i64,

    #[serde(default, deserialize_with = "lenient_variants")]
    pub variants: Vec<RawVariant>,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub featured_image: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
}

/// A purchasable variant as embedded in a product page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVariant {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub public_title: String,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub options: Vec<String>,

    #[serde(default, deserialize_with = "lenient_minor_units")]
    pub price: i64,

    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Option<f64>,
}

/// Variant with its price rendered in major currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVariant {
    pub title: String,
    pub sku: String,
    pub public_title: String,
    pub options: Vec<String>,
    /// Two-decimal price string, e.g. `"9.99"`
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Normalized product, one exported row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub title: String,
    pub description: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Breadcrumb categories in site order
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub price: String,
    pub price_min: String,
    pub price_max: String,
    pub variants: Vec<NormalizedVariant>,
    pub images: Vec<String>,
    pub featured_image: String,
    pub content: String,
}

impl ProductRecord {
    /// Column names of the exported table, in order
    pub const COLUMNS: [&'static str; 13] = [
        "title",
        "description",
        "vendor",
        "type",
        "categories",
        "tags",
        "price",
        "price_min",
        "price_max",
        "variants",
        "images",
        "featured_image",
        "content",
    ];

    /// Renders the record as one table row matching [`Self::COLUMNS`]
    ///
    /// Sequence and nested fields are written as compact JSON.
    pub fn to_row(&self) -> Result<Vec<String>, serde_json::Error> {
        Ok(vec![
            self.title.clone(),
            self.description.clone(),
            self.vendor.clone(),
            self.product_type.clone(),
            serde_json::to_string(&self.categories)?,
            serde_json::to_string(&self.tags)?,
            self.price.clone(),
            self.price_min.clone(),
            self.price_max.clone(),
            serde_json::to_string(&self.variants)?,
            serde_json::to_string(&self.images)?,
            self.featured_image.clone(),
            self.content.clone(),
        ])
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_string).unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(value_to_string)
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Accepts integers, floats and numeric strings; anything else is zero.
fn lenient_minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.round() as i64)
            .unwrap_or(0),
        _ => 0,
    })
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Skips variant entries that are not objects.
fn lenient_variants<'de, D>(deserializer: D) -> Result<Vec<RawVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
