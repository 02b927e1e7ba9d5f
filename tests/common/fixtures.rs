use chrono::NaiveDate;
use folio::{InMemoryRasterizer, Region};
use image::{Rgba, RgbaImage};

/// The date every test export is stamped with
pub fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

/// A logical-size capture whose rows shade from dark to light, so that every
/// page slice carries distinguishable pixels
pub fn striped(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        let [r, g, b] = stripe_shade(y);
        Rgba([r, g, b, 255])
    })
}

/// The RGB value of row `y` in a [`striped`] capture
pub fn stripe_shade(y: u32) -> [u8; 3] {
    let shade = (y % 256) as u8;
    [shade, 255 - shade, 128]
}

/// A rasterizer that knows a single region by id
pub fn rasterizer_with_id(id: &str, width: u32, height: u32) -> InMemoryRasterizer {
    InMemoryRasterizer::new().with_region(Region::id(id), striped(width, height))
}

/// A rasterizer that knows a single region by selector
pub fn rasterizer_with_selector(selector: &str, width: u32, height: u32) -> InMemoryRasterizer {
    InMemoryRasterizer::new().with_region(Region::selector(selector), striped(width, height))
}
