//! Output module for exporting the harvested catalog
//!
//! This module handles:
//! - Writing the catalog as CSV (default) or JSON
//! - Recording harvest statistics

mod csv_output;
mod json_output;
pub mod stats;
mod traits;

pub use csv_output::CsvExporter;
pub use json_output::JsonExporter;
pub use stats::{print_statistics, HarvestStats};
pub use traits::{ExportError, ExportResult, Exporter};

use crate::catalog::ProductRecord;
use crate::config::{OutputConfig, OutputFormat};
use std::path::Path;

/// Returns the exporter for an output format
pub fn exporter_for(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Csv => Box::new(CsvExporter::new()),
        OutputFormat::Json => Box::new(JsonExporter::new()),
    }
}

/// Exports the catalog as configured
///
/// Missing parent directories of the output path are created.
///
/// # Arguments
///
/// * `products` - Records in harvest order
/// * `config` - Output path and format
///
/// # Returns
///
/// * `Ok(())` - The file was written
/// * `Err(ExportError)` - Writing or encoding failed
pub fn export_products(products: &[ProductRecord], config: &OutputConfig) -> ExportResult<()> {
    let path = Path::new(&config.path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let exporter = exporter_for(config.resolved_format());
    exporter.export(products, path)?;

    tracing::info!(
        "Data saved to {} ({}, {} products)",
        path.display(),
        exporter.format_name(),
        products.len()
    );
    Ok(())
}
