//! Export configuration, loadable from JSON.
//!
//! ```json
//! {
//!   "page": { "size": "A4", "margin": "10mm" },
//!   "capture": { "scale": 2, "background": "#ffffff" },
//!   "brand": "Folio",
//!   "locale": "es",
//!   "imageEncoding": { "format": "jpeg", "quality": 85 }
//! }
//! ```
//!
//! Every key is optional.

use crate::error::ExportError;
use folio_layout::{Decorations, HeaderContent, compute_geometry};
use folio_render::{AssemblyStyle, ImageEncoding, Locale};
use folio_traits::CaptureOptions;
use folio_types::{Orientation, PageSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub page: PageSettings,
    pub capture: CaptureOptions,
    /// Product name leading every footer label.
    pub brand: String,
    pub locale: Locale,
    pub image_encoding: ImageEncoding,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page: PageSettings::default(),
            capture: CaptureOptions::default(),
            brand: AssemblyStyle::default().brand,
            locale: Locale::default(),
            image_encoding: ImageEncoding::default(),
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Checks that every page layout an export can pick leaves room for
    /// content.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.capture.has_valid_scale() {
            return Err(ExportError::Config(format!(
                "capture scale must be within (0, {}], got {}",
                CaptureOptions::MAX_SCALE,
                self.capture.scale
            )));
        }
        if let ImageEncoding::Jpeg { quality } = self.image_encoding
            && !(1..=100).contains(&quality)
        {
            return Err(ExportError::Config(format!(
                "JPEG quality must be within 1..=100, got {quality}"
            )));
        }

        let full_header = HeaderContent {
            has_title: true,
            has_subtitle: true,
        };
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            for decorations in [Decorations::REPORT, Decorations::PLAIN] {
                let geometry = compute_geometry(&self.page, orientation, full_header, decorations);
                let room = [
                    geometry.content_width(),
                    geometry.first_page_content_height(),
                    geometry.other_page_content_height(),
                ];
                let cramped = room.iter().any(|&mm| !(mm.is_finite() && mm > 0.0));
                if cramped {
                    return Err(ExportError::Config(format!(
                        "page settings leave no room for content on a {:?} {:?} page",
                        orientation, self.page.size
                    )));
                }
            }
        }
        Ok(())
    }

    /// The assembly style this configuration describes.
    pub fn style(&self) -> AssemblyStyle {
        AssemblyStyle {
            brand: self.brand.clone(),
            locale: self.locale,
            encoding: self.image_encoding,
            ..AssemblyStyle::default()
        }
    }
}
