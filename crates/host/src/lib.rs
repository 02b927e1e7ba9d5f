//! Host-environment implementations of the folio ports.
//!
//! ## Rasterizers
//!
//! - [`InMemoryRasterizer`]: pre-registered RGBA images keyed by region
//! - [`FilesystemRasterizer`]: pre-rendered captures read from a directory
//!
//! ## Sinks
//!
//! - [`DirectorySink`]: writes documents into a directory
//! - [`MemorySink`]: keeps documents in memory

mod filesystem;
mod memory;
mod raster;
mod sink;

pub use filesystem::FilesystemRasterizer;
pub use memory::InMemoryRasterizer;
pub use sink::{DirectorySink, MemorySink};
