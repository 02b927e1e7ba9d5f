//! Building the PDF from a paginated raster.
//!
//! Assembly is two passes over the document. The first appends one page per
//! slice, in page order, each showing its band of the raster (and page 1 the
//! header block). The second, [`stamp_footers`], runs only once every page
//! exists, since each footer names the final page count.

use crate::composer::stamp_footers;
use crate::error::RenderError;
use crate::fonts::StandardFont;
use crate::header::HeaderText;
use crate::locale::Locale;
use crate::slice_image::{EncodedImage, ImageEncoding, encode_slice};
use crate::utils::{PT_PER_MM, mm_to_pt, to_win_ansi};
use folio_layout::{Decorations, PageGeometry, PageSlice, Pagination};
use folio_types::{Bitmap, Color, PageSettings};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

const IMAGE_RESOURCE: &str = "Im1";

/// Text and image styling shared by every page of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyStyle {
    /// Product name leading every footer label.
    pub brand: String,
    pub locale: Locale,
    pub encoding: ImageEncoding,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub date_size: f32,
    pub footer_size: f32,
    pub title_color: Color,
    /// Subtitle and date stamp.
    pub muted_color: Color,
    pub footer_color: Color,
}

impl Default for AssemblyStyle {
    fn default() -> Self {
        Self {
            brand: "Folio".to_string(),
            locale: Locale::default(),
            encoding: ImageEncoding::default(),
            title_size: 18.0,
            subtitle_size: 12.0,
            date_size: 10.0,
            footer_size: 8.0,
            title_color: Color::BLACK,
            muted_color: Color::gray(100),
            footer_color: Color::gray(150),
        }
    }
}

/// A finished document, footers included.
#[derive(Debug)]
pub struct AssembledDocument {
    doc: Document,
    page_count: usize,
}

impl AssembledDocument {
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Serialises the document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

pub struct DocumentAssembler<'a> {
    style: &'a AssemblyStyle,
    settings: &'a PageSettings,
    decorations: Decorations,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        style: &'a AssemblyStyle,
        settings: &'a PageSettings,
        decorations: Decorations,
    ) -> Self {
        Self {
            style,
            settings,
            decorations,
        }
    }

    pub fn assemble(
        &self,
        pagination: &Pagination,
        geometry: &PageGeometry,
        bitmap: &Bitmap,
        header: &HeaderText,
    ) -> Result<AssembledDocument, RenderError> {
        if pagination.slices.is_empty() {
            return Err(RenderError::Other("pagination produced no pages".into()));
        }
        let images = self.encode_images(pagination, bitmap)?;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = doc.add_object(font.font_dictionary());
            fonts.set(font.resource_name(), font_id);
        }
        let fonts_id = doc.add_object(fonts);

        let media_box = vec![
            0.into(),
            0.into(),
            mm_to_pt(geometry.paper.width).into(),
            mm_to_pt(geometry.paper.height).into(),
        ];

        let mut kids = Vec::with_capacity(images.len());
        for (slice, image) in pagination.slices.iter().zip(images) {
            let image_id = doc.add_object(image.into_stream());
            let mut operations = place_image(slice, geometry);
            if slice.page_index == 1 && self.decorations.header {
                operations.extend(header.operations(geometry, self.settings, self.style));
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => fonts_id,
                    "XObject" => dictionary! { IMAGE_RESOURCE => image_id },
                },
            });
            log::debug!(
                "Appended page {} (rows {}..{})",
                slice.page_index,
                slice.source_y,
                slice.source_end()
            );
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = self.add_info(&mut doc, header);
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        if self.decorations.footer {
            stamp_footers(&mut doc, geometry, self.settings, self.style)?;
        }

        Ok(AssembledDocument { doc, page_count })
    }

    fn add_info(&self, doc: &mut Document, header: &HeaderText) -> ObjectId {
        let mut info = dictionary! {
            "Producer" => Object::string_literal(self.style.brand.as_str()),
            "CreationDate" => Object::string_literal(
                header.generated_on.format("D:%Y%m%d").to_string()
            ),
        };
        if let Some(title) = header.title() {
            info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
        }
        doc.add_object(info)
    }

    #[cfg(not(feature = "parallel-encode"))]
    fn encode_images(
        &self,
        pagination: &Pagination,
        bitmap: &Bitmap,
    ) -> Result<Vec<EncodedImage>, RenderError> {
        pagination
            .slices
            .iter()
            .map(|slice| encode_slice(bitmap, slice, self.style.encoding))
            .collect()
    }

    #[cfg(feature = "parallel-encode")]
    fn encode_images(
        &self,
        pagination: &Pagination,
        bitmap: &Bitmap,
    ) -> Result<Vec<EncodedImage>, RenderError> {
        use rayon::prelude::*;

        let encoding = self.style.encoding;
        // Indexed collect keeps page order
        pagination
            .slices
            .par_iter()
            .map(|slice| encode_slice(bitmap, slice, encoding))
            .collect()
    }
}

/// Draws the slice image at the left margin, `slice.placement_y` below the
/// paper's top edge, scaled to the content width.
fn place_image(slice: &PageSlice, geometry: &PageGeometry) -> Vec<Operation> {
    let width = mm_to_pt(geometry.content_width());
    let height = slice.rendered_height * PT_PER_MM;
    let x = mm_to_pt(geometry.margin);
    let y = mm_to_pt(geometry.paper.height - slice.placement_y - slice.rendered_height);
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ),
        Operation::new("Do", vec![IMAGE_RESOURCE.into()]),
        Operation::new("Q", vec![]),
    ]
}
