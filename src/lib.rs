//! # Maplet Print
//!
//! A print layout overlay for maplet maps.
//!
//! The overlay shows a paper sheet (format, orientation, margins) on top of
//! the map and derives what a print of the visible sheet would contain: the
//! map extent under the printable area, the print scale and the output size
//! in millimeters or device dots.

pub mod core;
pub mod input;
pub mod prelude;
pub mod print;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    extent::Extent,
    frame::FrameState,
    geo::{LatLng, Point},
    map::{Map, MapHandle, MapId, WeakMapHandle},
    projection::Projection,
    viewport::Viewport,
};

pub use input::{EventKind, EventManager, ListenerKey, MapEvent};

pub use print::{
    AttachmentState, ChangeKind, DotSize, Margins, Orientation, PaperFormat, PaperLayout,
    PaperSize, PrintConfig, PrintLayout, PrintLayoutEvent, PrintLayoutOptions,
};

pub use ui::controls::{Control, ControlId, RenderContext};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid {field} {value:?}, expected one of: {allowed}")]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Control error: {0}")]
    Control(String),
}

/// Error type alias for convenience
pub type Error = MapError;
