pub mod rasterizer;
pub mod sink;

pub use rasterizer::{CaptureError, CaptureOptions, Rasterizer, Region};
pub use sink::{FileSink, SaveError, SavedFile, validate_filename};
