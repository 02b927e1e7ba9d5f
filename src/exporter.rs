//! The export operations: capture a region, paginate it, assemble the PDF
//! and hand it to a sink.

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::request::{CaptureRequest, ExportOptions};
use chrono::NaiveDate;
use folio_layout::{HeaderContent, choose_orientation, compute_geometry, paginate};
use folio_render::{AssemblyStyle, DocumentAssembler, HeaderText, Locale};
use folio_traits::{FileSink, Rasterizer, Region, SavedFile, validate_filename};
use folio_types::Orientation;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub saved: SavedFile,
    pub pages: usize,
    pub orientation: Orientation,
}

/// A builder for configuring and creating a [`PdfExporter`].
pub struct ExporterBuilder<R, S> {
    rasterizer: R,
    sink: S,
    config: ExportConfig,
    date: Option<NaiveDate>,
}

impl<R: Rasterizer, S: FileSink> ExporterBuilder<R, S> {
    pub fn new(rasterizer: R, sink: S) -> Self {
        Self {
            rasterizer,
            sink,
            config: ExportConfig::default(),
            date: None,
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_config_json(self, json: &str) -> Result<Self, ExportError> {
        Ok(self.with_config(ExportConfig::from_json(json)?))
    }

    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ExportError> {
        Ok(self.with_config(ExportConfig::from_file(path)?))
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.config.brand = brand.into();
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Pins the generation date stamped on page 1. Defaults to today, local time.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the configuration and creates the exporter.
    pub fn build(self) -> Result<PdfExporter<R, S>, ExportError> {
        self.config.validate()?;
        log::debug!(
            "Building exporter with {} and {}",
            self.rasterizer.name(),
            self.sink.name()
        );
        Ok(PdfExporter {
            style: self.config.style(),
            rasterizer: self.rasterizer,
            sink: self.sink,
            config: self.config,
            date: self.date,
            in_flight: AtomicUsize::new(0),
        })
    }
}

/// Exports captured regions as paginated PDF documents.
///
/// Runs are independent: two exports started at once capture and save twice.
/// [`is_exporting`](Self::is_exporting) lets callers disable whatever
/// triggers an export while one is running.
pub struct PdfExporter<R, S> {
    rasterizer: R,
    sink: S,
    config: ExportConfig,
    style: AssemblyStyle,
    date: Option<NaiveDate>,
    in_flight: AtomicUsize,
}

impl<R: Rasterizer, S: FileSink> PdfExporter<R, S> {
    pub fn builder(rasterizer: R, sink: S) -> ExporterBuilder<R, S> {
        ExporterBuilder::new(rasterizer, sink)
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether any export is currently running.
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Exports the element `region_id` as a portrait report: title and
    /// subtitle on page 1, a date stamp, and "page X of N" footers.
    ///
    /// A leading `#` on the id is accepted.
    pub async fn export_region(
        &self,
        region_id: &str,
        options: ExportOptions,
    ) -> Result<ExportReport, ExportError> {
        let id = region_id.trim().trim_start_matches('#');
        if id.is_empty() {
            return Err(ExportError::ElementNotFound(region_id.to_string()));
        }
        self.export(CaptureRequest::report(Region::id(id), options))
            .await
            .map_err(|e| e.requested_as(region_id))
    }

    /// Exports whatever `selector` matches without header or footers, in
    /// the orientation that suits its aspect ratio.
    pub async fn export_view(
        &self,
        selector: &str,
        filename: &str,
    ) -> Result<ExportReport, ExportError> {
        if selector.trim().is_empty() {
            return Err(ExportError::ElementNotFound(selector.to_string()));
        }
        self.export(CaptureRequest::view(Region::parse(selector), filename))
            .await
            .map_err(|e| e.requested_as(selector))
    }

    /// Runs one export end to end.
    pub async fn export(&self, request: CaptureRequest) -> Result<ExportReport, ExportError> {
        let _running = InFlight::enter(&self.in_flight);
        let filename = request.pdf_filename();
        validate_filename(&filename)?;
        log::info!("Exporting {} to {}", request.region, filename);

        let bitmap = self
            .rasterizer
            .capture(&request.region, &self.config.capture)
            .await
            .inspect_err(|e| log::warn!("Capture of {} failed: {}", request.region, e))?;

        let orientation = choose_orientation(request.orientation, bitmap.size());
        let header = HeaderText::new(
            request.title.clone(),
            request.subtitle.clone(),
            self.generation_date(),
        );
        let geometry = compute_geometry(
            &self.config.page,
            orientation,
            HeaderContent::new(header.title(), header.subtitle()),
            request.decorations,
        );
        let pagination = paginate(bitmap.size(), &geometry);

        let mut document = DocumentAssembler::new(&self.style, &self.config.page, request.decorations)
            .assemble(&pagination, &geometry, &bitmap, &header)?;
        let bytes = document.to_bytes()?;
        let saved = self.sink.save(&filename, &bytes)?;

        log::info!(
            "Saved {} ({} pages, {:?}, {} bytes)",
            saved.filename,
            document.page_count(),
            orientation,
            saved.size
        );
        Ok(ExportReport {
            saved,
            pages: document.page_count(),
            orientation,
        })
    }

    fn generation_date(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Counts a run as in flight until dropped, on success and failure alike.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
