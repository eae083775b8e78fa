pub mod controls;

#[cfg(feature = "egui")]
pub mod overlay;
#[cfg(feature = "egui")]
pub mod style;

pub use controls::{Control, ControlId, ControlManager, RenderContext};

#[cfg(feature = "egui")]
pub use overlay::paint_print_overlay;
#[cfg(feature = "egui")]
pub use style::PrintOverlayStyle;
