//! Catalog data model
//!
//! This module holds the records that flow through a harvest:
//! - Collection references discovered on the collections index
//! - Raw product records as embedded in product pages
//! - Normalized product records ready for export

mod normalize;
mod types;

pub use normalize::{clean_category, format_minor_units, normalize_product, normalize_variant};
pub use types::{CollectionRef, NormalizedVariant, ProductRecord, RawProduct, RawVariant};
