//! egui painting of the print layout overlay: the map outside the sheet is
//! shaded, the sheet and its printable area are outlined.

use crate::{core::bounds::Bounds, print::layout::PaperLayout, ui::style::PrintOverlayStyle};
use egui::{pos2, Align2, Painter, Pos2, Rect};

/// Converts container-relative pixel bounds into an egui rect placed at `origin`
pub fn to_egui_rect(bounds: &Bounds, origin: Pos2) -> Rect {
    Rect::from_min_max(
        pos2(
            origin.x + bounds.min.x as f32,
            origin.y + bounds.min.y as f32,
        ),
        pos2(
            origin.x + bounds.max.x as f32,
            origin.y + bounds.max.y as f32,
        ),
    )
}

/// The four bands of `outer` not covered by `inner`
pub fn mask_rects(outer: Rect, inner: Rect) -> [Rect; 4] {
    let inner = inner.intersect(outer);
    [
        Rect::from_min_max(outer.min, pos2(outer.max.x, inner.min.y)),
        Rect::from_min_max(pos2(outer.min.x, inner.max.y), outer.max),
        Rect::from_min_max(pos2(outer.min.x, inner.min.y), pos2(inner.min.x, inner.max.y)),
        Rect::from_min_max(pos2(inner.max.x, inner.min.y), pos2(outer.max.x, inner.max.y)),
    ]
}

/// Paints the overlay for a map drawn into `map_rect`
pub fn paint_print_overlay(
    painter: &Painter,
    map_rect: Rect,
    layout: &PaperLayout,
    style: &PrintOverlayStyle,
    label: Option<&str>,
) {
    let frame = to_egui_rect(&layout.frame, map_rect.min);
    let printable = to_egui_rect(&layout.printable, map_rect.min);

    for band in mask_rects(map_rect, frame) {
        if band.is_positive() {
            painter.rect_filled(band, 0.0, style.mask_color);
        }
    }
    for band in mask_rects(frame, printable) {
        if band.is_positive() {
            painter.rect_filled(band, 0.0, style.margin_color);
        }
    }

    painter.rect_stroke(frame, 0.0, style.frame_stroke);
    painter.rect_stroke(printable, 0.0, style.printable_stroke);

    if let Some(label) = label {
        painter.text(
            pos2(frame.min.x, frame.min.y - style.label_offset),
            Align2::LEFT_BOTTOM,
            label,
            style.label_font.clone(),
            style.label_color,
        );
    }
}
