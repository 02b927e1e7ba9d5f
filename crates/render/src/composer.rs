//! The second assembly pass: content overlaid on pages that already exist.

use crate::assembler::AssemblyStyle;
use crate::error::RenderError;
use crate::fonts::StandardFont;
use crate::header::text_operations;
use crate::utils::{flip_y, mm_to_pt};
use folio_layout::PageGeometry;
use folio_types::PageSettings;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Adds a new content stream to an existing page, drawn on top of what the
/// page already shows.
///
/// The page's `/Contents` becomes an array if it was a single reference.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), RenderError> {
    let stream = Stream::new(dictionary! {}, content_stream);
    let new_content_id = doc.add_object(Object::Stream(stream));

    let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    let mut contents = match page_dict.get(b"Contents") {
        Ok(Object::Array(arr)) => arr.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => {
            return Err(RenderError::Pdf(format!(
                "page {page_id:?} is missing a /Contents key"
            )));
        }
    };
    contents.push(Object::Reference(new_content_id));
    page_dict.set("Contents", Object::Array(contents));
    Ok(())
}

/// Stamps the running footer on every page of `doc`.
///
/// Runs once the page count is final; each label carries its page number and
/// that total.
pub fn stamp_footers(
    doc: &mut Document,
    geometry: &PageGeometry,
    settings: &PageSettings,
    style: &AssemblyStyle,
) -> Result<(), RenderError> {
    let pages = doc.get_pages();
    let total = pages.len();
    let page_width = mm_to_pt(geometry.paper.width);
    let baseline = flip_y(
        mm_to_pt(geometry.paper.height - settings.footer_offset),
        mm_to_pt(geometry.paper.height),
    );

    // get_pages() is keyed by 1-based page number in document order
    for (number, page_id) in pages {
        let label = style.locale.footer_label(&style.brand, number as usize, total);
        let width = StandardFont::Helvetica.text_width(&label, style.footer_size);
        let content = Content {
            operations: text_operations(
                StandardFont::Helvetica,
                style.footer_size,
                style.footer_color,
                (page_width - width) / 2.0,
                baseline,
                &label,
            ),
        };
        overlay_content(doc, page_id, content.encode()?)?;
    }

    log::debug!("Stamped footers on {} pages", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_document(pages: usize) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for _ in 0..pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn overlay_wraps_single_contents_reference() {
        let mut doc = blank_document(1);
        let page_id = doc.get_pages()[&1];
        overlay_content(&mut doc, page_id, b"0 0 m".to_vec()).unwrap();

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 2);
    }

    #[test]
    fn footers_know_the_final_count() {
        let mut doc = blank_document(3);
        let settings = PageSettings::default();
        let geometry = folio_layout::compute_geometry(
            &settings,
            folio_types::Orientation::Portrait,
            folio_layout::HeaderContent::none(),
            folio_layout::Decorations::REPORT,
        );
        let style = AssemblyStyle {
            brand: "Folio".into(),
            ..AssemblyStyle::default()
        };
        stamp_footers(&mut doc, &geometry, &settings, &style).unwrap();

        for (number, page_id) in doc.get_pages() {
            let content = doc.get_and_decode_page_content(page_id).unwrap();
            let label = content
                .operations
                .iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| op.operands[0].as_str().ok())
                .unwrap()
                .to_vec();
            let expected = format!("Folio - P\u{e1}gina {number} de 3");
            assert_eq!(label, crate::utils::to_win_ansi(&expected));
        }
    }

    #[test]
    fn missing_contents_is_an_error() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(dictionary! { "Type" => "Page" });
        assert!(overlay_content(&mut doc, page_id, Vec::new()).is_err());
    }
}
