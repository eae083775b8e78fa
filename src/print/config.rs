//! Print configuration and construction options.
//!
//! Options can be built in code with the `with_*` helpers or loaded from JSON;
//! either way they pass through [`PrintLayoutOptions::validate`] before a
//! layout is created from them.

use crate::{
    core::constants::DEFAULT_DPI,
    print::paper::{Margins, Orientation, PaperFormat},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// The user-facing paper setup
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub format: PaperFormat,
    pub orientation: Orientation,
    pub margins: Margins,
}

impl PrintConfig {
    pub fn new(format: PaperFormat, orientation: Orientation, margins: Margins) -> Self {
        Self {
            format,
            orientation,
            margins: margins.clamped(),
        }
    }

    /// Paper `(width, height)` in millimeters for the current orientation
    pub fn paper_size_mm(&self) -> (f64, f64) {
        self.orientation.orient(self.format.dimensions())
    }
}

/// Everything a print layout is constructed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintLayoutOptions {
    #[serde(flatten)]
    pub config: PrintConfig,
    /// Resolution used by `print_box_size_in_dots` when none is passed
    pub dpi: f64,
}

impl Default for PrintLayoutOptions {
    fn default() -> Self {
        Self {
            config: PrintConfig::default(),
            dpi: DEFAULT_DPI,
        }
    }
}

impl PrintLayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: PaperFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamps margins and rejects resolutions that cannot be printed at
    pub fn validate(mut self) -> Result<Self> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(MapError::InvalidValue {
                field: "dpi",
                value: self.dpi.to_string(),
                allowed: "a finite number greater than zero".to_string(),
            });
        }
        self.config.margins = self.config.margins.clamped();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PrintLayoutOptions::default();
        assert_eq!(options.config.format, PaperFormat::A4);
        assert_eq!(options.config.orientation, Orientation::Portrait);
        assert_eq!(options.config.margins, Margins::uniform(2.0));
        assert_eq!(options.dpi, 192.0);
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{
            "format": "a3",
            "orientation": "LANDSCAPE",
            "margins": { "top": -1, "left": 1.5 }
        }"#;
        let options = PrintLayoutOptions::from_json(json).unwrap();

        assert_eq!(options.config.format, PaperFormat::A3);
        assert_eq!(options.config.orientation, Orientation::Landscape);
        // missing margin fields fall back to the default, negative ones clamp
        assert_eq!(options.config.margins, Margins::new(0.0, 2.0, 1.5, 2.0));
        assert_eq!(options.dpi, 192.0);
    }

    #[test]
    fn test_from_json_rejects_unknown_format() {
        let err = PrintLayoutOptions::from_json(r#"{ "format": "postcard" }"#).unwrap_err();
        assert!(matches!(err, MapError::Serialization(_)));
    }

    #[test]
    fn test_invalid_dpi() {
        let err = PrintLayoutOptions::new().with_dpi(0.0).validate().unwrap_err();
        assert!(matches!(err, MapError::InvalidValue { field: "dpi", .. }));
    }

    #[test]
    fn test_json_round_trip_keeps_config() {
        let options = PrintLayoutOptions::new()
            .with_format(PaperFormat::Tabloid)
            .with_orientation(Orientation::Landscape)
            .with_margins(Margins::uniform(1.0))
            .with_dpi(300.0);
        let back = PrintLayoutOptions::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(back, options);
    }
}
