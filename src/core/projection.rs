//! Map projections understood by the engine.
//!
//! Only the two projections web maps actually run on are supported: spherical
//! Web Mercator for the map plane and plain lon/lat for geographic output.

use crate::core::{extent::Extent, geo::LatLng, geo::Point};
use crate::MapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Spherical Web Mercator, meters
    #[default]
    #[serde(rename = "EPSG:3857")]
    WebMercator,
    /// Geographic longitude/latitude, degrees
    #[serde(rename = "EPSG:4326")]
    LonLat,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::WebMercator, Projection::LonLat];

    pub fn code(&self) -> &'static str {
        match self {
            Projection::WebMercator => "EPSG:3857",
            Projection::LonLat => "EPSG:4326",
        }
    }

    /// Projects a geographic coordinate into this projection's plane
    pub fn from_lat_lng(&self, lat_lng: &LatLng) -> Point {
        match self {
            Projection::WebMercator => lat_lng.to_mercator(),
            Projection::LonLat => Point::new(lat_lng.lng, lat_lng.lat),
        }
    }

    /// Inverse of [`Projection::from_lat_lng`]
    pub fn to_lat_lng(&self, point: &Point) -> LatLng {
        match self {
            Projection::WebMercator => LatLng::from_mercator(*point),
            Projection::LonLat => LatLng::new(point.y, point.x),
        }
    }

    /// Moves a coordinate from this projection into `target`
    pub fn transform(&self, point: &Point, target: Projection) -> Point {
        if *self == target {
            return *point;
        }
        target.from_lat_lng(&self.to_lat_lng(point))
    }

    /// Transforms an extent by re-projecting its four corners
    pub fn transform_extent(&self, extent: &Extent, target: Projection) -> Extent {
        if *self == target {
            return *extent;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for corner in extent.corners() {
            let p = self.transform(&corner, target);
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Extent::new(min_x, min_y, max_x, max_y)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Projection {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        match code.as_str() {
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" => Ok(Projection::WebMercator),
            "EPSG:4326" | "WGS84" | "CRS:84" => Ok(Projection::LonLat),
            _ => Err(MapError::UnknownProjection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("epsg:3857".parse::<Projection>().unwrap(), Projection::WebMercator);
        assert_eq!("EPSG:4326".parse::<Projection>().unwrap(), Projection::LonLat);
        assert!(matches!(
            "EPSG:28992".parse::<Projection>(),
            Err(MapError::UnknownProjection(_))
        ));
    }

    #[test]
    fn test_transform_extent_to_lon_lat() {
        let ll = LatLng::new(-10.0, -20.0).to_mercator();
        let ur = LatLng::new(30.0, 40.0).to_mercator();
        let extent = Extent::from_corners(ll, ur);

        let lon_lat = Projection::WebMercator.transform_extent(&extent, Projection::LonLat);
        assert!((lon_lat.min_x + 20.0).abs() < 1e-9);
        assert!((lon_lat.min_y + 10.0).abs() < 1e-9);
        assert!((lon_lat.max_x - 40.0).abs() < 1e-9);
        assert!((lon_lat.max_y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_transform() {
        let extent = Extent::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            Projection::LonLat.transform_extent(&extent, Projection::LonLat),
            extent
        );
    }
}
