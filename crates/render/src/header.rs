//! Page 1's header block: title, subtitle and the generation date stamp.

use crate::assembler::AssemblyStyle;
use crate::fonts::StandardFont;
use crate::utils::{flip_y, mm_to_pt, to_win_ansi};
use chrono::NaiveDate;
use folio_layout::PageGeometry;
use folio_types::{Color, PageSettings};
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// Baseline of the title below the top margin, in millimetres.
const TITLE_BASELINE: f32 = 8.0;
/// Baseline of the subtitle and date stamp below their line's top, in millimetres.
const LINE_BASELINE: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderText {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub generated_on: NaiveDate,
}

impl HeaderText {
    pub fn new(title: Option<String>, subtitle: Option<String>, generated_on: NaiveDate) -> Self {
        Self {
            title,
            subtitle,
            generated_on,
        }
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn subtitle(&self) -> Option<&str> {
        non_blank(self.subtitle.as_deref())
    }

    /// Content operations drawing the header block onto page 1.
    pub(crate) fn operations(
        &self,
        geometry: &PageGeometry,
        settings: &PageSettings,
        style: &AssemblyStyle,
    ) -> Vec<Operation> {
        let page_height = mm_to_pt(geometry.paper.height);
        let left = mm_to_pt(geometry.margin);
        let mut ops = Vec::new();
        let mut cursor = geometry.margin_top;

        if let Some(title) = self.title() {
            let baseline = flip_y(mm_to_pt(cursor + TITLE_BASELINE), page_height);
            ops.extend(text_operations(
                StandardFont::HelveticaBold,
                style.title_size,
                style.title_color,
                left,
                baseline,
                title,
            ));
            cursor += settings.title_height;
        }

        if let Some(subtitle) = self.subtitle() {
            let baseline = flip_y(mm_to_pt(cursor + LINE_BASELINE), page_height);
            ops.extend(text_operations(
                StandardFont::Helvetica,
                style.subtitle_size,
                style.muted_color,
                left,
                baseline,
                subtitle,
            ));
        }

        let date = style.locale.long_date(self.generated_on);
        let right = mm_to_pt(geometry.paper.width - geometry.margin);
        let width = StandardFont::Helvetica.text_width(&date, style.date_size);
        ops.extend(text_operations(
            StandardFont::Helvetica,
            style.date_size,
            style.muted_color,
            right - width,
            flip_y(mm_to_pt(geometry.margin_top + LINE_BASELINE), page_height),
            &date,
        ));
        ops
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// A single line of text in one of the standard fonts, `x`/`y` in points from
/// the bottom-left corner.
pub(crate) fn text_operations(
    font: StandardFont,
    size: f32,
    color: Color,
    x: f32,
    y: f32,
    text: &str,
) -> Vec<Operation> {
    let [r, g, b] = color.to_unit();
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}
