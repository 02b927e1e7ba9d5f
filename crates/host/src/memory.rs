use crate::raster::rasterize;
use folio_traits::{CaptureError, CaptureOptions, Rasterizer, Region};
use folio_types::Bitmap;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::RwLock;

/// A rasterizer over regions registered up front.
///
/// Each region is stored at its logical (1x) size; captures are scaled by
/// [`CaptureOptions::scale`] like a real render would be.
#[derive(Debug, Default)]
pub struct InMemoryRasterizer {
    regions: RwLock<HashMap<Region, RgbaImage>>,
}

impl InMemoryRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the pixels of `region`.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Failed` if the internal lock is poisoned.
    pub fn add(&self, region: Region, image: RgbaImage) -> Result<(), CaptureError> {
        let mut regions = self
            .regions
            .write()
            .map_err(|_| CaptureError::failed(&region, "region store lock poisoned"))?;
        regions.insert(region, image);
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_region(mut self, region: Region, image: RgbaImage) -> Self {
        if let Ok(regions) = self.regions.get_mut() {
            regions.insert(region, image);
        }
        self
    }

    pub fn remove(&self, region: &Region) -> bool {
        self.regions
            .write()
            .map(|mut regions| regions.remove(region).is_some())
            .unwrap_or(false)
    }

    pub fn contains(&self, region: &Region) -> bool {
        self.regions
            .read()
            .map(|regions| regions.contains_key(region))
            .unwrap_or(false)
    }
}

impl Rasterizer for InMemoryRasterizer {
    async fn capture(
        &self,
        region: &Region,
        options: &CaptureOptions,
    ) -> Result<Bitmap, CaptureError> {
        let regions = self
            .regions
            .read()
            .map_err(|_| CaptureError::failed(region, "region store lock poisoned"))?;
        let logical = regions
            .get(region)
            .ok_or_else(|| CaptureError::ElementNotFound(region.identifier().to_string()))?;
        rasterize(region, logical, options)
    }

    fn name(&self) -> &'static str {
        "InMemoryRasterizer"
    }
}
