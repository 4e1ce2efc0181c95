//! JSON exporter: a pretty-printed array of product records

use crate::catalog::ProductRecord;
use crate::output::traits::{ExportResult, Exporter};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export(&self, products: &[ProductRecord], path: &Path) -> ExportResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, products)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}
