use folio_layout::{Decorations, OrientationPolicy};
use folio_traits::Region;
use serde::{Deserialize, Serialize};

/// Caller-facing options of a report export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Output name without the `.pdf` extension.
    pub filename: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl ExportOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// One export run: what to capture, how to lay it out, where to save it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    pub region: Region,
    pub filename: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub orientation: OrientationPolicy,
    pub decorations: Decorations,
}

impl CaptureRequest {
    /// A portrait report with header block and footers.
    pub fn report(region: Region, options: ExportOptions) -> Self {
        Self {
            region,
            filename: options.filename,
            title: options.title,
            subtitle: options.subtitle,
            orientation: OrientationPolicy::Portrait,
            decorations: Decorations::REPORT,
        }
    }

    /// A bare capture, oriented to fit its content.
    pub fn view(region: Region, filename: impl Into<String>) -> Self {
        Self {
            region,
            filename: filename.into(),
            title: None,
            subtitle: None,
            orientation: OrientationPolicy::Auto,
            decorations: Decorations::PLAIN,
        }
    }

    pub fn pdf_filename(&self) -> String {
        format!("{}.pdf", self.filename)
    }
}

/// The conventional file name of a periodic report, e.g.
/// `report_filename("Balance General", 2024, 3)` is `balance-general-2024-3`.
pub fn report_filename(report: &str, year: i32, month: u32) -> String {
    slug::slugify(format!("{report} {year} {month}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_filenames_are_slugs() {
        assert_eq!(report_filename("Balance General", 2024, 3), "balance-general-2024-3");
        assert_eq!(report_filename("Flujo de Caja", 2023, 12), "flujo-de-caja-2023-12");
    }

    #[test]
    fn report_requests_carry_header_and_footer() {
        let request = CaptureRequest::report(
            Region::id("balance"),
            ExportOptions::new("balance-general-2024-3").with_title("Balance General"),
        );
        assert_eq!(request.pdf_filename(), "balance-general-2024-3.pdf");
        assert_eq!(request.decorations, Decorations::REPORT);
        assert_eq!(request.orientation, OrientationPolicy::Portrait);
    }

    #[test]
    fn view_requests_are_plain_and_adaptive() {
        let request = CaptureRequest::view(Region::selector(".report-view"), "vista");
        assert_eq!(request.decorations, Decorations::PLAIN);
        assert_eq!(request.orientation, OrientationPolicy::Auto);
        assert!(request.title.is_none());
    }
}
