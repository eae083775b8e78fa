use egui::{Color32, FontId, Stroke};

/// Style of the print layout overlay
#[derive(Debug, Clone)]
pub struct PrintOverlayStyle {
    /// Shade drawn over the map outside the paper sheet
    pub mask_color: Color32,
    /// Outline of the paper sheet
    pub frame_stroke: Stroke,
    /// Outline of the printable area inside the margins
    pub printable_stroke: Stroke,
    /// Tint of the margin band between sheet and printable area
    pub margin_color: Color32,
    pub label_font: FontId,
    pub label_color: Color32,
    /// Distance between the label and the sheet's top edge
    pub label_offset: f32,
}

impl Default for PrintOverlayStyle {
    fn default() -> Self {
        Self {
            mask_color: Color32::from_black_alpha(96),
            frame_stroke: Stroke::new(1.0, Color32::from_gray(60)),
            printable_stroke: Stroke::new(1.0, Color32::from_rgb(0, 120, 215)),
            margin_color: Color32::from_white_alpha(48),
            label_font: FontId::proportional(12.0),
            label_color: Color32::WHITE,
            label_offset: 4.0,
        }
    }
}

impl PrintOverlayStyle {
    /// A lighter variant for dark base maps
    pub fn dark() -> Self {
        Self {
            mask_color: Color32::from_white_alpha(64),
            frame_stroke: Stroke::new(1.0, Color32::from_gray(220)),
            label_color: Color32::BLACK,
            ..Self::default()
        }
    }
}
