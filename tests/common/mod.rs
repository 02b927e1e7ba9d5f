#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use folio::{ExportConfig, ExporterBuilder, InMemoryRasterizer, MemorySink, PdfExporter};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Load the file a memory sink saved as `filename`
    pub fn from_sink(sink: &MemorySink, filename: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = sink
            .get(filename)
            .ok_or_else(|| format!("nothing was saved as {filename}"))?;
        Self::from_bytes(bytes)
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// An exporter over an in-memory rasterizer and sink, dated 2026-10-18
pub fn memory_exporter(
    rasterizer: InMemoryRasterizer,
) -> PdfExporter<InMemoryRasterizer, MemorySink> {
    memory_exporter_with(rasterizer, ExportConfig::default())
}

pub fn memory_exporter_with(
    rasterizer: InMemoryRasterizer,
    config: ExportConfig,
) -> PdfExporter<InMemoryRasterizer, MemorySink> {
    ExporterBuilder::new(rasterizer, MemorySink::new())
        .with_config(config)
        .with_date(fixtures::export_date())
        .build()
        .expect("default test configuration is valid")
}
