use lopdf::content::Operation;
use flate2::read::ZlibDecoder;
use lopdf::{Document as LopdfDocument, Object};
use std::io::Read;

/// Decodes the content operations of page `page` (1-based)
pub fn page_operations(doc: &LopdfDocument, page: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let page_id = pages[&page];
    doc.get_and_decode_page_content(page_id)
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// The strings drawn with `Tj` on page `page`, decoded from WinAnsi
pub fn page_strings(doc: &LopdfDocument, page: u32) -> Vec<String> {
    page_operations(doc, page)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

/// The last string drawn on a page: the footer, when footers are stamped
pub fn footer_text(doc: &LopdfDocument, page: u32) -> Option<String> {
    page_strings(doc, page).pop()
}

/// Width and height of the page's MediaBox, in points
pub fn media_box(doc: &LopdfDocument, page: u32) -> (f32, f32) {
    let pages = doc.get_pages();
    let page_dict = doc
        .get_object(pages[&page])
        .and_then(Object::as_dict)
        .expect("page dictionary");
    let bbox = page_dict
        .get(b"MediaBox")
        .and_then(Object::as_array)
        .expect("MediaBox");
    let value = |i: usize| bbox[i].as_float().expect("numeric MediaBox");
    (value(2) - value(0), value(3) - value(1))
}

/// Operands of the image placement (`cm`) on a page: `[w, 0, 0, h, x, y]`
pub fn image_placement(doc: &LopdfDocument, page: u32) -> Vec<f32> {
    page_operations(doc, page)
        .iter()
        .find(|op| op.operator == "cm")
        .map(|op| op.operands.iter().filter_map(|o| o.as_float().ok()).collect())
        .unwrap_or_default()
}

/// The `/Filter` of every image XObject in the document
pub fn image_filters(doc: &LopdfDocument) -> Vec<String> {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Image")
        })
        .filter_map(|stream| stream.dict.get(b"Filter").and_then(Object::as_name).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// The image XObject drawn on a page, inflated to `(width, height, rgb)`
pub fn page_image(doc: &LopdfDocument, page: u32) -> Option<(u32, u32, Vec<u8>)> {
    let pages = doc.get_pages();
    let page_dict = doc.get_object(*pages.get(&page)?).and_then(Object::as_dict).ok()?;
    let (_, resources) = doc.dereference(page_dict.get(b"Resources").ok()?).ok()?;
    let xobjects = resources.as_dict().ok()?.get(b"XObject").and_then(Object::as_dict).ok()?;
    let (_, image) = xobjects.iter().next()?;
    let (_, image) = doc.dereference(image).ok()?;
    let stream = image.as_stream().ok()?;

    let dimension = |key: &[u8]| stream.dict.get(key).and_then(Object::as_i64).ok();
    let width = u32::try_from(dimension(b"Width")?).ok()?;
    let height = u32::try_from(dimension(b"Height")?).ok()?;
    let mut rgb = Vec::new();
    ZlibDecoder::new(stream.content.as_slice()).read_to_end(&mut rgb).ok()?;
    Some((width, height, rgb))
}

/// Millimetres to points
pub fn pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert that a page draws a specific string
#[macro_export]
macro_rules! assert_page_draws {
    ($pdf:expr, $page:expr, $text:expr) => {
        let strings = $crate::common::pdf_assertions::page_strings(&$pdf.doc, $page);
        assert!(
            strings.iter().any(|s| s == $text),
            "Page {} should draw '{}', but it drew {:?}",
            $page,
            $text,
            strings
        );
    };
}

/// Assert that two floating point values are within 0.01 of each other
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        let (left, right): (f32, f32) = ($left, $right);
        assert!(
            (left - right).abs() < 0.01,
            "Expected {} to be close to {}",
            left,
            right
        );
    };
}
