use crate::core::frame::FrameState;
use std::fmt;

/// Notifications emitted by the map to registered listeners
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Center or zoom changed (pan, zoom, set_view)
    ViewChanged { frame: FrameState },
    /// The map container was resized
    SizeChanged { frame: FrameState },
    /// A synchronous render pass finished
    PostRender { frame: FrameState },
}

impl MapEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MapEvent::ViewChanged { .. } => EventKind::ViewChanged,
            MapEvent::SizeChanged { .. } => EventKind::SizeChanged,
            MapEvent::PostRender { .. } => EventKind::PostRender,
        }
    }

    pub fn frame(&self) -> &FrameState {
        match self {
            MapEvent::ViewChanged { frame }
            | MapEvent::SizeChanged { frame }
            | MapEvent::PostRender { frame } => frame,
        }
    }
}

/// Discriminant used to key listener registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ViewChanged,
    SizeChanged,
    PostRender,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ViewChanged => "viewchanged",
            EventKind::SizeChanged => "sizechanged",
            EventKind::PostRender => "postrender",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
