use folio_types::{Orientation, PageSettings, PixelSize, Size};
use serde::{Deserialize, Serialize};

/// Which header lines page 1 carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderContent {
    pub has_title: bool,
    pub has_subtitle: bool,
}

impl HeaderContent {
    pub fn none() -> Self {
        Self::default()
    }

    /// Empty strings count as absent.
    pub fn new(title: Option<&str>, subtitle: Option<&str>) -> Self {
        let present = |s: Option<&str>| s.is_some_and(|s| !s.trim().is_empty());
        Self {
            has_title: present(title),
            has_subtitle: present(subtitle),
        }
    }
}

/// Which running decorations an export draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    /// Title, subtitle and date stamp on page 1.
    pub header: bool,
    /// "page X of N" on every page.
    pub footer: bool,
}

impl Decorations {
    pub const REPORT: Decorations = Decorations {
        header: true,
        footer: true,
    };
    pub const PLAIN: Decorations = Decorations {
        header: false,
        footer: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrientationPolicy {
    #[default]
    Portrait,
    Landscape,
    /// Decided from the captured content's aspect ratio.
    Auto,
}

pub fn choose_orientation(policy: OrientationPolicy, content: PixelSize) -> Orientation {
    match policy {
        OrientationPolicy::Portrait => Orientation::Portrait,
        OrientationPolicy::Landscape => Orientation::Landscape,
        OrientationPolicy::Auto => Orientation::for_aspect(content.width, content.height),
    }
}

/// Resolved page geometry for one export, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Paper size after orientation has been applied.
    pub paper: Size,
    pub orientation: Orientation,
    /// Left and right margin.
    pub margin: f32,
    pub margin_top: f32,
    /// Bottom margin, including any footer reservation.
    pub margin_bottom: f32,
    /// Where content starts on page 1: the top margin plus the header block.
    pub header_height: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.paper.width - 2.0 * self.margin
    }

    pub fn first_page_content_height(&self) -> f32 {
        self.paper.height - self.header_height - self.margin_bottom
    }

    pub fn other_page_content_height(&self) -> f32 {
        self.paper.height - self.margin_top - self.margin_bottom
    }
}

pub fn compute_geometry(
    settings: &PageSettings,
    orientation: Orientation,
    header: HeaderContent,
    decorations: Decorations,
) -> PageGeometry {
    let mut header_height = settings.margin;
    if decorations.header {
        if header.has_title {
            header_height += settings.title_height;
        }
        if header.has_subtitle {
            header_height += settings.subtitle_height;
        }
    }

    let margin_bottom = if decorations.footer {
        settings.margin + settings.footer_reserve
    } else {
        settings.margin
    };

    PageGeometry {
        paper: settings.size.oriented(orientation),
        orientation,
        margin: settings.margin,
        margin_top: settings.margin,
        margin_bottom,
        header_height,
    }
}
