//! Core constants derived from Leaflet defaults, OGC print conventions and
//! common web-map practice. Engine-wide magic numbers live here.

/// Default square tile size in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Web Mercator sphere radius (EPSG:3857) in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Zoom range accepted by the viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Resolution used for `print_box_size_in_dots` when the caller passes none.
pub const DEFAULT_DPI: f64 = 192.0;

pub const MM_PER_INCH: f64 = 25.4;

pub const MM_PER_CM: f64 = 10.0;

pub const MM_PER_METER: f64 = 1000.0;

/// Share of the restricting viewport dimension covered by the paper frame.
pub const PAPER_FILL_RATIO: f64 = 0.8;

/// Margin applied on every side of a freshly created layout, in centimeters.
pub const DEFAULT_MARGIN_CM: f64 = 2.0;
