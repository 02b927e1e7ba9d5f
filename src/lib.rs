//! Export rendered regions of a report as paginated PDF documents.
//!
//! An export captures a region through a [`Rasterizer`], slices the
//! resulting bitmap into page-sized bands with [`paginate`], assembles those
//! bands into a PDF with a [`DocumentAssembler`] and hands the bytes to a
//! [`FileSink`].
//!
//! ```no_run
//! use folio::{DirectorySink, ExportOptions, FilesystemRasterizer, PdfExporter};
//!
//! # async fn run() -> Result<(), folio::ExportError> {
//! let exporter = PdfExporter::builder(
//!     FilesystemRasterizer::new("captures"),
//!     DirectorySink::new("out"),
//! )
//! .with_brand("Cooperativa")
//! .build()?;
//!
//! let options = ExportOptions::new("balance-general-2024-3").with_title("Balance General");
//! exporter.export_region("balance-sheet", options).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod exporter;
mod request;

pub use config::ExportConfig;
pub use error::ExportError;
pub use exporter::{ExportReport, ExporterBuilder, PdfExporter};
pub use request::{CaptureRequest, ExportOptions, report_filename};

pub use folio_host::{DirectorySink, FilesystemRasterizer, InMemoryRasterizer, MemorySink};
pub use folio_layout::{
    Decorations, HeaderContent, OrientationPolicy, PageGeometry, PageSlice, Pagination,
    compute_geometry, paginate,
};
pub use folio_render::{AssemblyStyle, DocumentAssembler, HeaderText, ImageEncoding, Locale};
pub use folio_traits::{
    CaptureError, CaptureOptions, FileSink, Rasterizer, Region, SaveError, SavedFile,
};
pub use folio_types::{Bitmap, Color, Orientation, PageSettings, PageSize, PixelSize};
