//! Re-encoding a page's band of the raster as a PDF image XObject.

use crate::error::RenderError;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use folio_layout::PageSlice;
use folio_types::Bitmap;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use lopdf::{Stream, dictionary};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How slice pixels are stored in the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "camelCase")]
pub enum ImageEncoding {
    /// Raw RGB samples behind `/FlateDecode`. Lossless.
    #[default]
    Flate,
    /// Baseline JPEG behind `/DCTDecode`.
    Jpeg { quality: u8 },
}

#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub filter: &'static str,
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn into_stream(self) -> Stream {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => self.filter,
        };
        // The data is already compressed; keep lopdf from compressing it again.
        Stream::new(dict, self.data).with_compression(false)
    }
}

/// Crops `slice` out of `bitmap` and encodes it.
pub fn encode_slice(
    bitmap: &Bitmap,
    slice: &PageSlice,
    encoding: ImageEncoding,
) -> Result<EncodedImage, RenderError> {
    let band = bitmap.crop_rows(slice.source_y, slice.source_height);
    let (width, height) = band.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Other(format!(
            "page {} selects no pixels (rows {}..{})",
            slice.page_index,
            slice.source_y,
            slice.source_end()
        )));
    }

    let (filter, data) = match encoding {
        ImageEncoding::Flate => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(band.as_raw())?;
            ("FlateDecode", encoder.finish()?)
        }
        ImageEncoding::Jpeg { quality } => {
            let mut data = Vec::new();
            JpegEncoder::new_with_quality(&mut data, quality.clamp(1, 100)).write_image(
                band.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
            ("DCTDecode", data)
        }
    };

    log::debug!(
        "Encoded page {} ({}x{} px) as {} in {} bytes",
        slice.page_index,
        width,
        height,
        filter,
        data.len()
    );
    Ok(EncodedImage {
        width,
        height,
        filter,
        data,
    })
}
