pub mod bounds;
pub mod constants;
pub mod extent;
pub mod frame;
pub mod geo;
pub mod map;
pub mod projection;
pub mod viewport;
