//! Cutting a tall raster into page-sized slices.
//!
//! The raster is scaled uniformly so its width fills the content width. When
//! the scaled height fits in page 1's content area the whole raster becomes a
//! single slice; otherwise the raster is consumed top to bottom, page 1 taking
//! the rows that fit below the header block and every later page taking the
//! rows that fit between the plain margins.

use crate::geometry::PageGeometry;
use folio_types::PixelSize;

/// Slack when converting a content height into whole pixel rows, so that a
/// budget like `1299.9999` is not floored a full row short.
const EPSILON: f32 = 1e-3;

/// One page's horizontal band of the source raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    /// 1-based page number.
    pub page_index: usize,
    /// First source row of the band.
    pub source_y: u32,
    /// Number of source rows in the band.
    pub source_height: u32,
    /// Top edge of the placed image on the page, in millimetres.
    pub placement_y: f32,
    /// Height of the placed image on the page, in millimetres.
    pub rendered_height: f32,
}

impl PageSlice {
    /// One past the last source row of the band.
    pub fn source_end(&self) -> u32 {
        self.source_y + self.source_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Slices in page order; contiguous and non-overlapping in source rows.
    pub slices: Vec<PageSlice>,
    pub needs_multiple_pages: bool,
    /// Millimetres per source pixel, applied to both axes.
    pub scale: f32,
    pub source: PixelSize,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.slices.len()
    }

    pub fn total_source_height(&self) -> u32 {
        self.slices.iter().map(|s| s.source_height).sum()
    }
}

/// Slices a raster of size `source` into pages under `geometry`.
///
/// # Panics
///
/// Panics if `source` has zero width, or if the geometry leaves no room for
/// content (non-positive content width or content height). Those are
/// configuration bugs, not runtime conditions.
pub fn paginate(source: PixelSize, geometry: &PageGeometry) -> Pagination {
    assert!(source.width > 0, "cannot paginate a zero-width raster");
    let content_width = geometry.content_width();
    assert!(
        content_width > 0.0,
        "page geometry leaves no content width ({content_width}mm)"
    );

    let scale = content_width / source.width as f32;
    let scaled_height = source.height as f32 * scale;
    let first_height = geometry.first_page_content_height();

    if scaled_height <= first_height {
        log::debug!(
            "Content of {:.2}mm fits on one page ({:.2}mm available)",
            scaled_height,
            first_height
        );
        return Pagination {
            slices: vec![PageSlice {
                page_index: 1,
                source_y: 0,
                source_height: source.height,
                placement_y: geometry.header_height,
                rendered_height: scaled_height,
            }],
            needs_multiple_pages: false,
            scale,
            source,
        };
    }

    let other_height = geometry.other_page_content_height();
    assert!(
        first_height > 0.0,
        "page geometry leaves no content height on page 1 ({first_height}mm)"
    );
    assert!(
        other_height > 0.0,
        "page geometry leaves no content height on continuation pages ({other_height}mm)"
    );

    let pixels_per_unit = source.width as f32 / content_width;
    let first_budget = row_budget(first_height, pixels_per_unit);
    let other_budget = row_budget(other_height, pixels_per_unit);

    let mut slices = Vec::new();
    let mut source_y = 0u32;
    while source_y < source.height {
        let remaining = source.height - source_y;
        let (budget, placement_y) = if slices.is_empty() {
            (first_budget, geometry.header_height)
        } else {
            (other_budget, geometry.margin_top)
        };
        // The last band is clamped to exactly what is left.
        let rows = budget.min(remaining);
        slices.push(PageSlice {
            page_index: slices.len() + 1,
            source_y,
            source_height: rows,
            placement_y,
            rendered_height: rows as f32 * scale,
        });
        source_y += rows;
    }

    log::debug!(
        "Sliced {}x{}px into {} pages ({} rows on page 1, {} rows per continuation page)",
        source.width,
        source.height,
        slices.len(),
        first_budget,
        other_budget
    );

    Pagination {
        needs_multiple_pages: slices.len() > 1,
        slices,
        scale,
        source,
    }
}

/// Whole source rows that fit in `content_height` millimetres. Never zero, so
/// every page makes progress.
fn row_budget(content_height: f32, pixels_per_unit: f32) -> u32 {
    ((content_height * pixels_per_unit + EPSILON).floor() as u32).max(1)
}
