use crate::core::constants::{EARTH_RADIUS, MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::extent::Extent;
use crate::core::geo::{LatLng, Point};
use crate::core::projection::Projection;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        };
        viewport.center = viewport.clamp_center(center);
        viewport
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = self.clamp_center(center);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size. Negative dimensions are treated as zero.
    pub fn set_size(&mut self, size: Point) {
        self.size = Point::new(size.x.max(0.0), size.y.max(0.0));
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let mercator = lat_lng.to_mercator();
        let half_world = PI * EARTH_RADIUS;

        let pixel_x = (mercator.x + half_world) / (2.0 * half_world) * scale;
        let pixel_y = (-mercator.y + half_world) / (2.0 * half_world) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let half_world = PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * (2.0 * half_world) - half_world;
        let y = half_world - (pixel.y / scale) * (2.0 * half_world);

        LatLng::from_mercator(Point::new(x, y))
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.lat_lng_to_layer_point(lat_lng);
        self.layer_point_to_container_point(&layer_point)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = self.container_point_to_layer_point(pixel);
        self.layer_point_to_lat_lng(&layer_point)
    }

    /// Converts a container pixel into a coordinate of `projection`
    pub fn pixel_to_coordinate(&self, pixel: &Point, projection: Projection) -> Point {
        projection.from_lat_lng(&self.pixel_to_lat_lng(pixel))
    }

    /// Converts LatLng to layer point (relative to the center's world pixel)
    pub fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        let projected_point = self.project(lat_lng, None);
        projected_point.subtract(&self.project(&self.center, None))
    }

    /// Converts layer point back to LatLng
    pub fn layer_point_to_lat_lng(&self, point: &Point) -> LatLng {
        let projected_point = point.add(&self.project(&self.center, None));
        self.unproject(&projected_point, None)
    }

    /// Converts layer point to container point (screen coordinates)
    pub fn layer_point_to_container_point(&self, point: &Point) -> Point {
        Point::new(point.x + self.size.x / 2.0, point.y + self.size.y / 2.0)
    }

    /// Converts container point to layer point
    pub fn container_point_to_layer_point(&self, point: &Point) -> Point {
        Point::new(point.x - self.size.x / 2.0, point.y - self.size.y / 2.0)
    }

    /// Pans the viewport by the given pixel offset; returns the applied delta
    pub fn pan(&mut self, delta: Point) -> Point {
        let old_center = self.project(&self.center, None);
        let new_center = self.unproject(&old_center.add(&delta), None);
        self.set_center(new_center);
        self.project(&self.center, None).subtract(&old_center)
    }

    /// Zooms the viewport to a specific level, keeping `focus_point` stationary if given
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);

        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus_screen);
                self.zoom = new_zoom;

                let new_focus_screen = self.lat_lng_to_pixel(&focus_lat_lng);
                self.pan(new_focus_screen.subtract(&focus_screen));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Gets the current viewport extent in `projection`
    pub fn extent(&self, projection: Projection) -> Extent {
        let top_left = self.pixel_to_coordinate(&Point::new(0.0, 0.0), projection);
        let bottom_right =
            self.pixel_to_coordinate(&Point::new(self.size.x, self.size.y), projection);
        Extent::from_corners(top_left, bottom_right)
    }

    /// Gets the resolution in meters per pixel at the equator for the current zoom
    pub fn resolution(&self) -> f64 {
        2.0 * PI * EARTH_RADIUS / (TILE_SIZE * self.scale())
    }

    fn clamp_center(&self, center: LatLng) -> LatLng {
        LatLng::new(
            center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(40.7128, -74.0060),
            10.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 10.0);
        assert_eq!(viewport.center.lat, 40.7128);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center_lat_lng = viewport.pixel_to_lat_lng(&Point::new(256.0, 256.0));
        assert!(center_lat_lng.lat.abs() < 1e-9);
        assert!(center_lat_lng.lng.abs() < 1e-9);

        // At zoom 1 the world is 512px wide, so the right edge is the antimeridian
        let east = viewport.pixel_to_lat_lng(&Point::new(512.0, 256.0));
        assert!((east.lng - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::new(LatLng::new(52.0, 5.0), 12.0, Point::new(1024.0, 768.0));
        let coordinate =
            viewport.pixel_to_coordinate(&Point::new(100.0, 700.0), Projection::WebMercator);
        let back = viewport.lat_lng_to_pixel(&Projection::WebMercator.to_lat_lng(&coordinate));
        assert!((back.x - 100.0).abs() < 1e-6);
        assert!((back.y - 700.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_y_points_south() {
        let viewport = Viewport::new(LatLng::new(10.0, 10.0), 8.0, Point::new(400.0, 400.0));
        let top = viewport.pixel_to_lat_lng(&Point::new(200.0, 0.0));
        let bottom = viewport.pixel_to_lat_lng(&Point::new(200.0, 400.0));
        assert!(top.lat > bottom.lat);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();

        viewport.set_zoom(-1.0);
        assert_eq!(viewport.zoom, MIN_ZOOM);

        viewport.set_zoom(25.0);
        assert_eq!(viewport.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let original_center = viewport.center;
        let applied = viewport.pan(Point::new(10.0, 10.0));

        assert_ne!(viewport.center, original_center);
        assert!((applied.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_resolution_halves_per_zoom() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(3.0);
        let r3 = viewport.resolution();
        viewport.set_zoom(4.0);
        assert!((r3 / viewport.resolution() - 2.0).abs() < 1e-12);
    }
}
