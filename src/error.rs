use folio_render::RenderError;
use folio_traits::{CaptureError, SaveError};
use thiserror::Error;

/// Everything that can abort an export.
///
/// Every failure aborts the whole run; nothing is saved unless the document
/// was assembled and footed completely.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(#[source] CaptureError),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExportError {
    /// Reports a missing element under the identifier the caller passed in.
    pub(crate) fn requested_as(self, requested: &str) -> Self {
        match self {
            ExportError::ElementNotFound(_) => ExportError::ElementNotFound(requested.to_string()),
            other => other,
        }
    }
}

impl From<CaptureError> for ExportError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::ElementNotFound(identifier) => ExportError::ElementNotFound(identifier),
            other => ExportError::CaptureFailed(other),
        }
    }
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        ExportError::ExportFailed(err.to_string())
    }
}

impl From<SaveError> for ExportError {
    fn from(err: SaveError) -> Self {
        ExportError::ExportFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Config(err.to_string())
    }
}
