pub mod bitmap;
pub mod color;
pub mod geometry;
pub mod page;

pub use bitmap::{Bitmap, BitmapError};
pub use color::Color;
pub use geometry::{PixelSize, Size};
pub use page::{Orientation, PageSettings, PageSize};
