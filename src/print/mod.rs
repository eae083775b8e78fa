//! Print layout overlay: paper setup, sheet geometry and the map control
//! tying them to a host map.

pub mod config;
pub mod events;
pub mod layout;
pub mod overlay;
pub mod paper;

pub use config::{PrintConfig, PrintLayoutOptions};
pub use events::{ChangeKind, PrintLayoutEvent, PrintLayoutSnapshot, SubscriptionId};
pub use layout::{PaperLayout, RestrictingDimension};
pub use overlay::{AttachmentState, PrintLayout};
pub use paper::{DotSize, Margins, Orientation, PaperFormat, PaperSize};
