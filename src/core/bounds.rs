use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Represents a rectangle in screen/pixel coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from the top-left corner and a size
    pub fn from_origin_and_size(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin, Point::new(origin.x + width, origin.y + height))
    }

    /// Creates bounds from a center point and size
    pub fn from_center_and_size(center: Point, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self::new(
            Point::new(center.x - half_width, center.y - half_height),
            Point::new(center.x + half_width, center.y + half_height),
        )
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the size as a Point
    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns these bounds moved by `offset`
    pub fn translate(&self, offset: &Point) -> Bounds {
        Bounds::new(self.min.add(offset), self.max.add(offset))
    }

    /// Expresses these bounds relative to `origin`
    pub fn relative_to(&self, origin: &Point) -> Bounds {
        Bounds::new(self.min.subtract(origin), self.max.subtract(origin))
    }

    /// Shrinks the bounds by per-side insets. Insets larger than the
    /// rectangle collapse it onto its center line instead of inverting it.
    pub fn inset(&self, top: f64, right: f64, bottom: f64, left: f64) -> Bounds {
        let mut min_x = self.min.x + left;
        let mut max_x = self.max.x - right;
        let mut min_y = self.min.y + top;
        let mut max_y = self.max.y - bottom;

        if min_x > max_x {
            let mid = (min_x + max_x) / 2.0;
            min_x = mid;
            max_x = mid;
        }
        if min_y > max_y {
            let mid = (min_y + max_y) / 2.0;
            min_y = mid;
            max_y = mid;
        }

        Bounds::from_coords(min_x, min_y, max_x, max_y)
    }

    /// Screen-space lower-left corner
    pub fn bottom_left(&self) -> Point {
        Point::new(self.min.x, self.max.y)
    }

    /// Screen-space upper-right corner
    pub fn top_right(&self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    /// Checks if the bounds are valid (min <= max)
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 20.0);
        assert_eq!(bounds.center(), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert!(bounds.contains(&Point::new(15.0, 25.0)));
        assert!(!bounds.contains(&Point::new(5.0, 25.0)));
    }

    #[test]
    fn test_inset_and_corners() {
        let bounds = Bounds::from_origin_and_size(Point::new(100.0, 50.0), 200.0, 100.0);
        let inner = bounds.inset(10.0, 20.0, 30.0, 40.0);

        assert_eq!(inner, Bounds::from_coords(140.0, 60.0, 280.0, 120.0));
        assert_eq!(inner.bottom_left(), Point::new(140.0, 120.0));
        assert_eq!(inner.top_right(), Point::new(280.0, 60.0));
        assert!(bounds.contains(&inner.min) && bounds.contains(&inner.max));
    }

    #[test]
    fn test_oversized_inset_collapses() {
        let bounds = Bounds::from_coords(0.0, 0.0, 10.0, 10.0);
        let inner = bounds.inset(0.0, 8.0, 0.0, 8.0);
        assert!(inner.is_valid());
        assert_eq!(inner.width(), 0.0);
        assert_eq!(inner.min.x, 5.0);
    }

    #[test]
    fn test_relative_to() {
        let bounds = Bounds::from_coords(110.0, 60.0, 150.0, 90.0);
        let relative = bounds.relative_to(&Point::new(100.0, 50.0));
        assert_eq!(relative, Bounds::from_coords(10.0, 10.0, 50.0, 40.0));
    }
}
