use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in map coordinates (y grows upwards):
/// `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds the smallest extent holding both corners, in whatever order they come
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x, self.min_y)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.min_x, self.max_y)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.bottom_left(),
            self.bottom_right(),
            self.top_right(),
            self.top_left(),
        ]
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; 4]> for Extent {
    fn from(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }
}

impl From<Extent> for [f64; 4] {
    fn from(extent: Extent) -> Self {
        extent.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let extent = Extent::from_corners(Point::new(5.0, -1.0), Point::new(-3.0, 4.0));
        assert_eq!(extent.to_array(), [-3.0, -1.0, 5.0, 4.0]);
        assert_eq!(extent.width(), 8.0);
        assert_eq!(extent.height(), 5.0);
    }

    #[test]
    fn test_serializes_as_array() {
        let extent = Extent::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&extent).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");

        let back: Extent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, extent);
    }
}
