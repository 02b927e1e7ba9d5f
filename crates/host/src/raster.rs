use folio_traits::{CaptureError, CaptureOptions, Region};
use folio_types::{Bitmap, PixelSize};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Renders a logical-size RGBA capture at `options.scale` and flattens it
/// onto the background.
pub(crate) fn rasterize(
    region: &Region,
    logical: &RgbaImage,
    options: &CaptureOptions,
) -> Result<Bitmap, CaptureError> {
    if !options.has_valid_scale() {
        return Err(CaptureError::failed(
            region,
            format!("invalid capture scale {}", options.scale),
        ));
    }

    let size = PixelSize::new(logical.width(), logical.height());
    let target = size.scaled(options.scale);
    let bitmap = if size.is_empty() || target == size {
        Bitmap::from_rgba(logical, options.background)
    } else {
        let scaled = imageops::resize(logical, target.width, target.height, FilterType::Triangle);
        Bitmap::from_rgba(&scaled, options.background)
    };
    bitmap.map_err(|e| CaptureError::from_bitmap(region, e))
}
