//! PDF assembly for captured regions.
//!
//! This crate turns a [`folio_layout::Pagination`] and its source bitmap into
//! a `lopdf` document:
//! - one page per slice, each carrying its band of the bitmap as an image XObject
//! - a header block (title, subtitle, date stamp) on page 1
//! - a "page X of N" footer on every page, stamped in a second pass once the
//!   page count is final

mod assembler;
mod composer;
mod error;
mod fonts;
mod header;
mod locale;
mod slice_image;
pub mod utils;

pub use assembler::{AssembledDocument, AssemblyStyle, DocumentAssembler};
pub use composer::{overlay_content, stamp_footers};
pub use error::RenderError;
pub use fonts::StandardFont;
pub use header::HeaderText;
pub use locale::Locale;
pub use slice_image::{EncodedImage, ImageEncoding, encode_slice};
