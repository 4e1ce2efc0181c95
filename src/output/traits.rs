//! Exporter trait and error types
//!
//! An exporter turns the harvested catalog into one file on disk.

use crate::catalog::ProductRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while exporting the catalog
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Trait for catalog exporters
pub trait Exporter {
    /// Writes `products` to `path`, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `products` - Records in harvest order
    /// * `path` - Destination file
    fn export(&self, products: &[ProductRecord], path: &Path) -> ExportResult<()>;

    /// Short name of the format, used in log messages
    fn format_name(&self) -> &'static str;
}
