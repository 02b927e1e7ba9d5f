//! Filesystem-backed rasterizer for pre-rendered captures.
//!
//! Each region is looked up as an image file inside a base directory. The
//! file name is the slug of the region's identifier, so `#balance-sheet`
//! reads `balance-sheet.png` and `.report-view table` reads
//! `report-view-table.png`.
//!
//! # Security
//!
//! Identifiers that could name a path outside the base directory are
//! rejected before any lookup.

use crate::raster::rasterize;
use folio_traits::{CaptureError, CaptureOptions, Rasterizer, Region};
use folio_types::Bitmap;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, for each region.
const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct FilesystemRasterizer {
    base_path: PathBuf,
}

impl FilesystemRasterizer {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// The candidate files for `region`, or `None` if its identifier is unusable.
    fn candidates(&self, region: &Region) -> Option<Vec<PathBuf>> {
        let identifier = region.identifier();
        if identifier.contains("..") || identifier.contains(['/', '\\']) {
            log::warn!("Rejected region '{}' (path traversal blocked)", identifier);
            return None;
        }
        let stem = slug::slugify(identifier);
        if stem.is_empty() {
            return None;
        }
        Some(
            EXTENSIONS
                .iter()
                .map(|ext| self.base_path.join(format!("{stem}.{ext}")))
                .collect(),
        )
    }

    async fn locate(&self, region: &Region) -> Result<PathBuf, CaptureError> {
        let not_found = || CaptureError::ElementNotFound(region.identifier().to_string());
        for path in self.candidates(region).ok_or_else(not_found)? {
            match tokio::fs::try_exists(&path).await {
                Ok(true) => return Ok(path),
                Ok(false) => {}
                Err(e) => return Err(CaptureError::failed(region, e)),
            }
        }
        Err(not_found())
    }
}

impl Rasterizer for FilesystemRasterizer {
    async fn capture(
        &self,
        region: &Region,
        options: &CaptureOptions,
    ) -> Result<Bitmap, CaptureError> {
        let path = self.locate(region).await?;
        log::debug!("Capturing '{}' from {}", region, path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CaptureError::ElementNotFound(region.identifier().to_string())
            } else {
                CaptureError::failed(region, e)
            }
        })?;

        let owned_region = region.clone();
        let options = options.clone();
        tokio::task::spawn_blocking(move || {
            let logical = image::load_from_memory(&bytes)
                .map_err(|e| CaptureError::failed(&owned_region, e))?
                .to_rgba8();
            rasterize(&owned_region, &logical, &options)
        })
        .await
        .map_err(|e| CaptureError::failed(region, e))?
    }

    fn name(&self) -> &'static str {
        "FilesystemRasterizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 0, 255]))
            .save_with_format(dir.join(name), ImageFormat::Png)
            .unwrap();
    }

    #[tokio::test]
    async fn loads_by_slugged_identifier() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "balance-sheet.png", 20, 30);

        let rasterizer = FilesystemRasterizer::new(dir.path());
        let bitmap = rasterizer
            .capture(&Region::id("balance-sheet"), &CaptureOptions::default())
            .await
            .unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (40, 60));
    }

    #[tokio::test]
    async fn selectors_map_to_slugs() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "report-view.png", 8, 4);

        let rasterizer = FilesystemRasterizer::new(dir.path());
        let options = CaptureOptions {
            scale: 1.0,
            ..CaptureOptions::default()
        };
        let bitmap = rasterizer
            .capture(&Region::selector(".report-view"), &options)
            .await
            .unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (8, 4));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let rasterizer = FilesystemRasterizer::new(dir.path());
        let err = rasterizer
            .capture(&Region::id("nope"), &CaptureOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, CaptureError::ElementNotFound("nope".into()));
    }

    #[tokio::test]
    async fn blocks_path_traversal() {
        let dir = tempdir().unwrap();
        let rasterizer = FilesystemRasterizer::new(dir.path());
        for identifier in ["../../etc/passwd", "a/b", "..\\secret"] {
            let result = rasterizer
                .capture(&Region::selector(identifier), &CaptureOptions::default())
                .await;
            assert!(matches!(result, Err(CaptureError::ElementNotFound(_))));
        }
    }

    #[tokio::test]
    async fn undecodable_file_fails_capture() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        let rasterizer = FilesystemRasterizer::new(dir.path());
        let err = rasterizer
            .capture(&Region::id("broken"), &CaptureOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Failed { .. }));
    }
}
