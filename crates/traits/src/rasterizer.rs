//! Rasterizer trait for abstracting region capture.
//!
//! The engine never talks to a render tree directly. Whatever can turn a
//! region reference into pixels (a browser, a headless renderer, a directory
//! of pre-rendered screenshots, a test fixture) implements [`Rasterizer`].

use folio_types::{Bitmap, BitmapError, Color};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Error type for capture operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Failed to capture '{region}': {message}")]
    Failed { region: String, message: String },
}

impl CaptureError {
    pub fn failed(region: &Region, message: impl fmt::Display) -> Self {
        CaptureError::Failed {
            region: region.identifier().to_string(),
            message: message.to_string(),
        }
    }

    pub fn from_bitmap(region: &Region, err: BitmapError) -> Self {
        Self::failed(region, err)
    }
}

/// A reference to the subtree to capture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    /// An element id, without the leading `#`.
    Id(String),
    /// Any other CSS selector.
    Selector(String),
}

impl Region {
    pub fn id(id: impl Into<String>) -> Self {
        Region::Id(id.into())
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Region::Selector(selector.into())
    }

    /// Interprets `#name` as an id and anything else as a selector.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        match reference.strip_prefix('#') {
            Some(id) if !id.is_empty() && !id.contains([' ', '.', '>', '[', ':']) => {
                Region::Id(id.to_string())
            }
            _ => Region::Selector(reference.to_string()),
        }
    }

    /// The identifier exactly as the caller supplied it.
    pub fn identifier(&self) -> &str {
        match self {
            Region::Id(id) => id,
            Region::Selector(selector) => selector,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Id(id) => write!(f, "#{}", id),
            Region::Selector(selector) => f.write_str(selector),
        }
    }
}

/// How a region is turned into pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureOptions {
    /// Oversampling factor applied to the region's logical size.
    pub scale: f32,
    /// Color that transparent areas are flattened onto.
    pub background: Color,
    /// Whether images from other origins may be loaded while rendering.
    pub allow_cross_origin: bool,
}

impl CaptureOptions {
    /// Largest oversampling factor a capture accepts.
    pub const MAX_SCALE: f32 = 8.0;

    /// Whether `scale` lies in `(0, MAX_SCALE]`.
    pub fn has_valid_scale(&self) -> bool {
        self.scale > 0.0 && self.scale <= Self::MAX_SCALE
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Color::WHITE,
            allow_cross_origin: true,
        }
    }
}

/// A capability that renders a region, at its full scrollable extent, into a
/// [`Bitmap`].
///
/// Capturing is the one suspending step of an export. Implementations must
/// wait until the region is fully rendered (images, fonts, layout) before
/// resolving. The region must not be mutated while a capture is in flight;
/// nothing here guards against that.
pub trait Rasterizer: Send + Sync {
    /// Captures `region`.
    ///
    /// Resolves to [`CaptureError::ElementNotFound`] when the region does not
    /// exist at call time, and to [`CaptureError::Failed`] for any rendering
    /// problem.
    fn capture(
        &self,
        region: &Region,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<Bitmap, CaptureError>> + Send;

    /// Returns a human-readable name for this rasterizer (for logging/debugging).
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_ids_from_selectors() {
        assert_eq!(Region::parse("#balance-sheet"), Region::id("balance-sheet"));
        assert_eq!(Region::parse(".report-view"), Region::selector(".report-view"));
        assert_eq!(Region::parse("#main .table"), Region::selector("#main .table"));
        assert_eq!(Region::parse("#"), Region::selector("#"));
    }

    #[test]
    fn scale_is_bounded() {
        let mut options = CaptureOptions::default();
        assert!(options.has_valid_scale());
        options.scale = CaptureOptions::MAX_SCALE;
        assert!(options.has_valid_scale());
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY, 1e9] {
            options.scale = scale;
            assert!(!options.has_valid_scale(), "scale {scale} accepted");
        }
    }

    #[test]
    fn identifier_is_what_was_requested() {
        assert_eq!(Region::id("cash-flow").identifier(), "cash-flow");
        assert_eq!(Region::id("cash-flow").to_string(), "#cash-flow");
        let err = CaptureError::ElementNotFound(Region::id("x").identifier().to_string());
        assert_eq!(err.to_string(), "Element not found: x");
    }

    #[test]
    fn capture_options_defaults() {
        let opts: CaptureOptions = serde_json::from_str(r#"{ "scale": 1.5 }"#).unwrap();
        assert_eq!(opts.scale, 1.5);
        assert_eq!(opts.background, Color::WHITE);
        assert!(opts.allow_cross_origin);
    }
}
