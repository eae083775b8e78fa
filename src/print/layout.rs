//! Paper geometry: where the sheet sits on the map, what it covers on the
//! ground and how large the printable area is on paper.

use crate::{
    core::{
        bounds::Bounds,
        constants::{MM_PER_CM, MM_PER_INCH, MM_PER_METER, PAPER_FILL_RATIO},
        extent::Extent,
        frame::FrameState,
        geo::{LatLng, Point},
    },
    print::{
        config::PrintConfig,
        paper::{DotSize, Margins, PaperSize},
    },
};

/// Which viewport dimension bounds the paper frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestrictingDimension {
    #[default]
    Width,
    Height,
}

/// Pixel geometry of the overlay, relative to the map container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaperLayout {
    /// Outer paper sheet
    pub frame: Bounds,
    /// Sheet minus margins
    pub printable: Bounds,
    /// Margin insets in pixels
    pub margins_px: Margins,
    /// Pixels per centimeter of paper
    pub pixels_per_cm: f64,
    pub restricting: RestrictingDimension,
}

impl PaperLayout {
    /// The printable area in screen coordinates for a container at `origin`
    pub fn printable_on_screen(&self, origin: &Point) -> Bounds {
        self.printable.translate(origin)
    }
}

/// Width over height; a zero height counts as infinitely wide
pub fn aspect_ratio(width: f64, height: f64) -> f64 {
    if height == 0.0 {
        f64::INFINITY
    } else {
        width / height
    }
}

/// Sizes the paper frame to the viewport and insets the printable area.
pub fn compute_layout(config: &PrintConfig, viewport_size: Point) -> PaperLayout {
    let (paper_width, paper_height) = config.paper_size_mm();
    let paper_ratio = aspect_ratio(paper_width, paper_height);
    let viewport_ratio = aspect_ratio(viewport_size.x, viewport_size.y);

    let (restricting, width, height) = if viewport_ratio < paper_ratio {
        let width = viewport_size.x * PAPER_FILL_RATIO;
        (RestrictingDimension::Width, width, width / paper_ratio)
    } else {
        let height = viewport_size.y * PAPER_FILL_RATIO;
        (RestrictingDimension::Height, height * paper_ratio, height)
    };

    let center = Point::new(viewport_size.x / 2.0, viewport_size.y / 2.0);
    let frame = Bounds::from_center_and_size(center, width, height);

    // the long edge is vertical in portrait and horizontal in landscape
    let long_edge_px = if config.orientation.is_landscape() {
        width
    } else {
        height
    };
    let long_edge_cm = config.format.long_edge_mm() / MM_PER_CM;
    let pixels_per_cm = long_edge_px / long_edge_cm;

    let margins_px = config.margins.scaled(pixels_per_cm);
    let printable = frame.inset(
        margins_px.top,
        margins_px.right,
        margins_px.bottom,
        margins_px.left,
    );

    PaperLayout {
        frame,
        printable,
        margins_px,
        pixels_per_cm,
        restricting,
    }
}

/// Map extent under the printable area, in the frame's native projection.
pub fn compute_bounding_box(layout: &PaperLayout, frame: &FrameState) -> Extent {
    let origin = frame.container_origin();
    let printable = layout
        .printable_on_screen(&origin)
        .relative_to(&origin);

    let lower_left = frame.pixel_to_coordinate(&printable.bottom_left());
    let upper_right = frame.pixel_to_coordinate(&printable.top_right());

    Extent::from_corners(lower_left, upper_right)
}

/// Printable width and height on paper, in millimeters
pub fn printable_size_mm(config: &PrintConfig) -> PaperSize {
    let (paper_width, paper_height) = config.paper_size_mm();
    let margins = config.margins;
    PaperSize::new(
        (paper_width - margins.horizontal() * MM_PER_CM).max(0.0),
        (paper_height - margins.vertical() * MM_PER_CM).max(0.0),
    )
}

/// Converts a paper size to device dots at `dpi`
pub fn size_in_dots(size: PaperSize, dpi: f64) -> DotSize {
    let to_dots = |mm: f64| (mm / MM_PER_INCH * dpi).round() as u32;
    DotSize::new(to_dots(size.width), to_dots(size.height))
}

/// Ground distance along the lower edge of `lon_lat` per unit of printed width.
///
/// Only the lower edge is measured; distortion across the height of the box
/// is not taken into account.
pub fn scale_denominator(lon_lat: &Extent, printable_width_mm: f64) -> Option<f64> {
    let width_m = printable_width_mm / MM_PER_METER;
    if width_m <= 0.0 || !lon_lat.is_finite() {
        return None;
    }

    let lower_left = lon_lat.bottom_left();
    let lower_right = lon_lat.bottom_right();
    let ground = LatLng::new(lower_left.y, lower_left.x)
        .distance_to(&LatLng::new(lower_right.y, lower_right.x));

    Some(ground / width_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::Map;
    use crate::core::projection::Projection;
    use crate::print::paper::{Orientation, PaperFormat};

    fn a4(orientation: Orientation, margin: f64) -> PrintConfig {
        PrintConfig::new(PaperFormat::A4, orientation, Margins::uniform(margin))
    }

    #[test]
    fn test_aspect_ratio_zero_height() {
        assert_eq!(aspect_ratio(100.0, 0.0), f64::INFINITY);
        assert_eq!(aspect_ratio(100.0, 50.0), 2.0);
    }

    #[test]
    fn test_wide_viewport_restricts_height() {
        let layout = compute_layout(
            &a4(Orientation::Portrait, 0.0),
            Point::new(1000.0, 500.0),
        );

        assert_eq!(layout.restricting, RestrictingDimension::Height);
        assert!((layout.frame.height() - 400.0).abs() < 1e-9);
        assert!((layout.frame.width() - 400.0 * 210.0 / 297.0).abs() < 1e-9);
        assert_eq!(layout.frame.center(), Point::new(500.0, 250.0));
    }

    #[test]
    fn test_tall_viewport_restricts_width() {
        let layout = compute_layout(
            &a4(Orientation::Landscape, 0.0),
            Point::new(500.0, 1000.0),
        );

        assert_eq!(layout.restricting, RestrictingDimension::Width);
        assert!((layout.frame.width() - 400.0).abs() < 1e-9);
        assert!((layout.frame.height() - 400.0 * 210.0 / 297.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_height_viewport() {
        let layout = compute_layout(&a4(Orientation::Portrait, 1.0), Point::new(800.0, 0.0));
        assert_eq!(layout.restricting, RestrictingDimension::Height);
        assert_eq!(layout.frame.width(), 0.0);
        assert_eq!(layout.frame.height(), 0.0);
        assert!(layout.printable.is_valid());
    }

    #[test]
    fn test_margins_scale_with_long_edge() {
        // 297mm long edge drawn 594px tall => 20px per cm
        let config = a4(Orientation::Portrait, 2.0);
        let layout = compute_layout(&config, Point::new(2000.0, 742.5));

        assert!((layout.frame.height() - 594.0).abs() < 1e-9);
        assert!((layout.pixels_per_cm - 20.0).abs() < 1e-9);
        assert!((layout.margins_px.top - 40.0).abs() < 1e-9);
        assert!((layout.printable.width() - (layout.frame.width() - 80.0)).abs() < 1e-9);
        assert!((layout.printable.height() - 514.0).abs() < 1e-9);
    }

    #[test]
    fn test_printable_aspect_matches_paper() {
        let config = PrintConfig::new(
            PaperFormat::A3,
            Orientation::Landscape,
            Margins::new(1.0, 2.0, 3.0, 0.5),
        );
        let layout = compute_layout(&config, Point::new(1280.0, 720.0));
        let size = printable_size_mm(&config);

        let px_ratio = layout.printable.width() / layout.printable.height();
        let mm_ratio = size.width / size.height;
        assert!((px_ratio - mm_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_printable_size_example() {
        let size = printable_size_mm(&a4(Orientation::Portrait, 2.0));
        assert_eq!(size, PaperSize::new(170.0, 257.0));
        assert_eq!(size_in_dots(size, 192.0), DotSize::new(1285, 1943));
    }

    #[test]
    fn test_printable_size_never_negative() {
        let size = printable_size_mm(&a4(Orientation::Portrait, 50.0));
        assert_eq!(size, PaperSize::new(0.0, 0.0));
    }

    #[test]
    fn test_dots_at_zero_dpi() {
        let size = printable_size_mm(&a4(Orientation::Landscape, 1.0));
        assert_eq!(size_in_dots(size, 0.0), DotSize::new(0, 0));
    }

    #[test]
    fn test_bounding_box_is_inside_viewport_extent() {
        let map = Map::new(LatLng::new(52.0, 5.0), 10.0, Point::new(1024.0, 768.0))
            .with_container_origin(Point::new(200.0, 100.0));
        let frame = map.frame_state();
        let layout = compute_layout(&a4(Orientation::Portrait, 1.0), frame.size());

        let bbox = compute_bounding_box(&layout, &frame);
        let view = frame.viewport.extent(Projection::WebMercator);

        assert!(bbox.min_x > view.min_x && bbox.max_x < view.max_x);
        assert!(bbox.min_y > view.min_y && bbox.max_y < view.max_y);
        // the sheet is centered, so is the box
        let center = bbox.center();
        let view_center = view.center();
        assert!((center.x - view_center.x).abs() < 1e-3);
        assert!((center.y - view_center.y).abs() < 1.0);
    }

    #[test]
    fn test_bounding_box_width_matches_resolution() {
        let map = Map::new(LatLng::new(0.0, 0.0), 4.0, Point::new(1000.0, 1000.0));
        let frame = map.frame_state();
        let layout = compute_layout(&a4(Orientation::Landscape, 0.0), frame.size());

        let bbox = compute_bounding_box(&layout, &frame);
        let expected = layout.printable.width() * frame.viewport.resolution();
        assert!((bbox.width() - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_scale_denominator_on_equator() {
        // one degree of longitude on the equator printed 100mm wide
        let lon_lat = Extent::new(0.0, 0.0, 1.0, 0.5);
        let denominator = scale_denominator(&lon_lat, 100.0).unwrap();
        assert!((denominator - 1_111_950.0).abs() < 50.0);
    }

    #[test]
    fn test_scale_denominator_uses_lower_edge() {
        let north = Extent::new(0.0, 60.0, 1.0, 61.0);
        let south = Extent::new(0.0, 0.0, 1.0, 61.0);
        let n = scale_denominator(&north, 100.0).unwrap();
        let s = scale_denominator(&south, 100.0).unwrap();
        // cos(60deg) = 0.5
        assert!((n / s - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_scale_denominator_without_width() {
        assert!(scale_denominator(&Extent::new(0.0, 0.0, 1.0, 1.0), 0.0).is_none());
    }
}
