use crate::core::{
    bounds::Bounds, geo::Point, map::MapId, projection::Projection, viewport::Viewport,
};

/// Immutable snapshot of the host map handed to listeners and controls.
///
/// Carrying the whole view lets callbacks convert pixels to coordinates
/// without reaching back into the (possibly locked) map.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub map_id: MapId,
    pub viewport: Viewport,
    /// Map container rectangle in screen coordinates
    pub container: Bounds,
    pub projection: Projection,
}

impl FrameState {
    /// Viewport size in pixels
    pub fn size(&self) -> Point {
        self.viewport.size
    }

    pub fn container_origin(&self) -> Point {
        self.container.min
    }

    /// Converts a container-relative pixel to a coordinate in the native projection
    pub fn pixel_to_coordinate(&self, pixel: &Point) -> Point {
        self.viewport.pixel_to_coordinate(pixel, self.projection)
    }
}
