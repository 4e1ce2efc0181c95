//! CSV exporter
//!
//! One header row with [`ProductRecord::COLUMNS`], then one row per product.
//! List fields (categories, tags, variants, images) are compact JSON.

use crate::catalog::ProductRecord;
use crate::output::traits::{ExportResult, Exporter};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the table to any writer
    pub fn write_to<W: std::io::Write>(
        &self,
        products: &[ProductRecord],
        writer: W,
    ) -> ExportResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(ProductRecord::COLUMNS)?;

        for product in products {
            writer.write_record(product.to_row()?)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export(&self, products: &[ProductRecord], path: &Path) -> ExportResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(products, std::io::BufWriter::new(file))
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}
