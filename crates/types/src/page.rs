//! Paper sizes, orientation and the page settings an export is laid out with.
//!
//! All lengths are millimetres.

use crate::geometry::Size;
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// Aspect ratio (width / height) above which content is laid out landscape.
pub const LANDSCAPE_ASPECT_THRESHOLD: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => {
                if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
                    return Err(de::Error::custom(format!(
                        "Page dimensions must be positive, got {}x{}",
                        width, height
                    )));
                }
                Ok(PageSize::Custom { width, height })
            }
        }
    }
}

impl PageSize {
    /// Portrait dimensions of the paper.
    pub fn dimensions_mm(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(210.0, 297.0),
            PageSize::Letter => Size::new(215.9, 279.4),
            PageSize::Legal => Size::new(215.9, 355.6),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }

    /// Effective dimensions once the paper is turned to `orientation`.
    ///
    /// Landscape always puts the long edge horizontal, whatever way round a
    /// custom size was declared.
    pub fn oriented(&self, orientation: Orientation) -> Size {
        let size = self.dimensions_mm();
        let is_landscape = size.width > size.height;
        match (orientation, is_landscape) {
            (Orientation::Portrait, true) | (Orientation::Landscape, false) => size.transposed(),
            _ => size,
        }
    }

    /// Parse a page size name (e.g., "A4", "Letter", "Legal")
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Picks the orientation for content of the given pixel dimensions.
    ///
    /// Landscape is chosen only when the content is strictly wider than
    /// [`LANDSCAPE_ASPECT_THRESHOLD`] times its height.
    pub fn for_aspect(width: u32, height: u32) -> Self {
        if height == 0 {
            return Orientation::Landscape;
        }
        if width as f32 / height as f32 > LANDSCAPE_ASPECT_THRESHOLD {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// The page-level knobs of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub size: PageSize,
    /// Side and top margin.
    #[serde(deserialize_with = "de_length")]
    pub margin: f32,
    /// Extra bottom margin on pages that carry a footer.
    #[serde(deserialize_with = "de_length")]
    pub footer_reserve: f32,
    /// Vertical space taken by the title line of the header block.
    #[serde(deserialize_with = "de_length")]
    pub title_height: f32,
    /// Vertical space taken by the subtitle line of the header block.
    #[serde(deserialize_with = "de_length")]
    pub subtitle_height: f32,
    /// Distance from the bottom paper edge to the footer baseline.
    #[serde(deserialize_with = "de_length")]
    pub footer_offset: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: 10.0,
            footer_reserve: 5.0,
            title_height: 15.0,
            subtitle_height: 10.0,
            footer_offset: 7.0,
        }
    }
}

/// Parse a length with an optional unit (e.g., "10mm", "1cm", "0.5in", "12pt").
/// Bare numbers are millimetres.
pub fn parse_length_mm(input: &str) -> Result<f32, String> {
    let input = input.trim();
    let (number, factor) = if let Some(val) = input.strip_suffix("mm") {
        (val, 1.0)
    } else if let Some(val) = input.strip_suffix("cm") {
        (val, 10.0)
    } else if let Some(val) = input.strip_suffix("in") {
        (val, 25.4)
    } else if let Some(val) = input.strip_suffix("pt") {
        (val, 25.4 / 72.0)
    } else {
        (input, 1.0)
    };
    number
        .trim()
        .parse::<f32>()
        .map(|v| v * factor)
        .map_err(|e| format!("Invalid length '{}': {}", input, e))
}

fn de_length<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LengthDef {
        Num(f32),
        Str(String),
    }

    let value = match LengthDef::deserialize(deserializer)? {
        LengthDef::Num(v) => v,
        LengthDef::Str(s) => parse_length_mm(&s).map_err(de::Error::custom)?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(de::Error::custom(format!(
            "Length must be finite and not negative, got {}",
            value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_boundary_is_strict() {
        assert_eq!(Orientation::for_aspect(1500, 1000), Orientation::Landscape);
        assert_eq!(Orientation::for_aspect(1100, 1000), Orientation::Portrait);
        assert_eq!(Orientation::for_aspect(1200, 1000), Orientation::Portrait);
        assert_eq!(Orientation::for_aspect(1201, 1000), Orientation::Landscape);
    }

    #[test]
    fn oriented_swaps_for_landscape() {
        assert_eq!(PageSize::A4.oriented(Orientation::Portrait), Size::new(210.0, 297.0));
        assert_eq!(PageSize::A4.oriented(Orientation::Landscape), Size::new(297.0, 210.0));
        let wide = PageSize::Custom { width: 300.0, height: 100.0 };
        assert_eq!(wide.oriented(Orientation::Portrait), Size::new(100.0, 300.0));
    }

    #[test]
    fn page_settings_deserialize_with_units_and_defaults() {
        let settings: PageSettings =
            serde_json::from_str(r#"{ "size": "letter", "margin": "1cm", "footerReserve": 4 }"#)
                .unwrap();
        assert_eq!(settings.size, PageSize::Letter);
        assert!((settings.margin - 10.0).abs() < 1e-4);
        assert_eq!(settings.footer_reserve, 4.0);
        assert_eq!(settings.title_height, 15.0);
    }

    #[test]
    fn custom_page_size_round_trips_through_map() {
        let size: PageSize = serde_json::from_str(r#"{ "width": 100, "height": 150 }"#).unwrap();
        assert_eq!(size, PageSize::Custom { width: 100.0, height: 150.0 });
        assert!(serde_json::from_str::<PageSize>("\"A5\"").is_err());
        assert!(serde_json::from_str::<PageSize>(r#"{ "width": 0, "height": 1 }"#).is_err());
    }

    #[test]
    fn parse_length_units() {
        assert_eq!(parse_length_mm("12").unwrap(), 12.0);
        assert!((parse_length_mm("1in").unwrap() - 25.4).abs() < 1e-4);
        assert!((parse_length_mm("72pt").unwrap() - 25.4).abs() < 1e-3);
        assert!(parse_length_mm("ten").is_err());
    }

    #[test]
    fn rejects_lengths_that_are_not_finite() {
        assert!(serde_json::from_str::<PageSettings>(r#"{ "margin": "NaN" }"#).is_err());
        assert!(serde_json::from_str::<PageSettings>(r#"{ "margin": "inf" }"#).is_err());
        assert!(serde_json::from_str::<PageSettings>(r#"{ "footerReserve": 1e39 }"#).is_err());
        assert!(serde_json::from_str::<PageSize>(r#"{ "width": 1e39, "height": 100 }"#).is_err());
    }
}
