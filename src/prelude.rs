//! Prelude module for common maplet-print types and traits
//!
//! Re-exports the most commonly used items for `use maplet_print::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    extent::Extent,
    frame::FrameState,
    geo::{LatLng, Point},
    map::{Map, MapHandle, MapId},
    projection::Projection,
    viewport::Viewport,
};

pub use crate::input::{EventKind, EventManager, MapEvent};

pub use crate::print::{
    AttachmentState, ChangeKind, DotSize, Margins, Orientation, PaperFormat, PaperLayout,
    PaperSize, PrintConfig, PrintLayout, PrintLayoutEvent, PrintLayoutOptions,
};

pub use crate::ui::controls::{Control, ControlId, RenderContext};

#[cfg(feature = "egui")]
pub use crate::ui::{paint_print_overlay, PrintOverlayStyle};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
