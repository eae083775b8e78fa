//! Paper sheets: named formats, orientation and margins.

use crate::{core::constants::DEFAULT_MARGIN_CM, MapError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named physical sheet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaperFormat {
    A0,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    A6,
    Letter,
    Legal,
    Tabloid,
    Broadsheet,
}

/// Short and long edge of a sheet in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperDimensions {
    pub short_edge: f64,
    pub long_edge: f64,
}

const fn dims(short_edge: f64, long_edge: f64) -> PaperDimensions {
    PaperDimensions {
        short_edge,
        long_edge,
    }
}

/// Canonical name and edge lengths (mm) of every format, in `PaperFormat::ALL` order
const PAPER_TABLE: [(&str, PaperDimensions); 11] = [
    ("A0", dims(841.0, 1189.0)),
    ("A1", dims(594.0, 841.0)),
    ("A2", dims(420.0, 594.0)),
    ("A3", dims(297.0, 420.0)),
    ("A4", dims(210.0, 297.0)),
    ("A5", dims(148.0, 210.0)),
    ("A6", dims(105.0, 148.0)),
    ("LETTER", dims(215.9, 279.4)),
    ("LEGAL", dims(215.9, 355.6)),
    ("TABLOID", dims(279.4, 431.8)),
    ("BROADSHEET", dims(600.0, 750.0)),
];

impl PaperFormat {
    pub const ALL: [PaperFormat; 11] = [
        PaperFormat::A0,
        PaperFormat::A1,
        PaperFormat::A2,
        PaperFormat::A3,
        PaperFormat::A4,
        PaperFormat::A5,
        PaperFormat::A6,
        PaperFormat::Letter,
        PaperFormat::Legal,
        PaperFormat::Tabloid,
        PaperFormat::Broadsheet,
    ];

    fn entry(&self) -> &'static (&'static str, PaperDimensions) {
        &PAPER_TABLE[*self as usize]
    }

    /// Canonical (upper case) name
    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    pub fn dimensions(&self) -> PaperDimensions {
        self.entry().1
    }

    pub fn short_edge_mm(&self) -> f64 {
        self.dimensions().short_edge
    }

    pub fn long_edge_mm(&self) -> f64 {
        self.dimensions().long_edge
    }

    /// Comma separated list of accepted names, for error messages
    pub fn allowed_values() -> String {
        PAPER_TABLE
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperFormat {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaperFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MapError::InvalidValue {
                field: "format",
                value: s.to_string(),
                allowed: PaperFormat::allowed_values(),
            })
    }
}

impl TryFrom<String> for PaperFormat {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperFormat> for String {
    fn from(format: PaperFormat) -> Self {
        format.name().to_string()
    }
}

/// Which paper edge runs horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::Landscape)
    }

    /// Returns `(width, height)` of a sheet held in this orientation
    pub fn orient(&self, dimensions: PaperDimensions) -> (f64, f64) {
        match self {
            Orientation::Portrait => (dimensions.short_edge, dimensions.long_edge),
            Orientation::Landscape => (dimensions.long_edge, dimensions.short_edge),
        }
    }

    pub fn allowed_values() -> String {
        Orientation::ALL
            .iter()
            .map(Orientation::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Orientation::ALL
            .into_iter()
            .find(|orientation| orientation.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MapError::InvalidValue {
                field: "orientation",
                value: s.to_string(),
                allowed: Orientation::allowed_values(),
            })
    }
}

impl TryFrom<String> for Orientation {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Orientation> for String {
    fn from(orientation: Orientation) -> Self {
        orientation.name().to_string()
    }
}

/// Sheet margins in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn uniform(cm: f64) -> Self {
        Self::new(cm, cm, cm, cm)
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Negative and NaN fields become zero, the rest are kept
    pub fn clamped(&self) -> Self {
        Self::new(
            self.top.max(0.0),
            self.bottom.max(0.0),
            self.left.max(0.0),
            self.right.max(0.0),
        )
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.top * factor,
            self.bottom * factor,
            self.left * factor,
            self.right * factor,
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN_CM)
    }
}

/// A physical size in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A size in device dots at some resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DotSize {
    pub width: u32,
    pub height: u32,
}

impl DotSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_variants() {
        for (index, format) in PaperFormat::ALL.iter().enumerate() {
            assert_eq!(*format as usize, index);
            assert!(format.short_edge_mm() < format.long_edge_mm());
        }
        assert_eq!(PaperFormat::A4.dimensions(), dims(210.0, 297.0));
        assert_eq!(PaperFormat::Letter.name(), "LETTER");
    }

    #[test]
    fn test_format_parse_is_case_insensitive() {
        assert_eq!("a3".parse::<PaperFormat>().unwrap(), PaperFormat::A3);
        assert_eq!("Tabloid".parse::<PaperFormat>().unwrap(), PaperFormat::Tabloid);
        assert_eq!(
            " broadsheet ".parse::<PaperFormat>().unwrap(),
            PaperFormat::Broadsheet
        );
    }

    #[test]
    fn test_format_parse_error_names_allowed_set() {
        let err = "B5".parse::<PaperFormat>().unwrap_err();
        match err {
            MapError::InvalidValue {
                field,
                value,
                allowed,
            } => {
                assert_eq!(field, "format");
                assert_eq!(value, "B5");
                assert!(allowed.contains("A4"));
                assert!(allowed.contains("BROADSHEET"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_orientation_parse_and_orient() {
        assert_eq!("LANDSCAPE".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert!("sideways".parse::<Orientation>().is_err());

        let a4 = PaperFormat::A4.dimensions();
        assert_eq!(Orientation::Portrait.orient(a4), (210.0, 297.0));
        assert_eq!(Orientation::Landscape.orient(a4), (297.0, 210.0));
    }

    #[test]
    fn test_margins_clamping() {
        let margins = Margins::new(-1.0, 2.5, f64::NAN, 0.0).clamped();
        assert_eq!(margins, Margins::new(0.0, 2.5, 0.0, 0.0));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&(PaperFormat::Letter, Orientation::Landscape)).unwrap();
        assert_eq!(json, r#"["LETTER","landscape"]"#);

        let parsed: (PaperFormat, Orientation) =
            serde_json::from_str(r#"["a5","Portrait"]"#).unwrap();
        assert_eq!(parsed, (PaperFormat::A5, Orientation::Portrait));

        assert!(serde_json::from_str::<PaperFormat>(r#""A9""#).is_err());
    }
}
