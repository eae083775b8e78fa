pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventKind, MapEvent};
pub use handler::{EventCallback, EventManager, ListenerKey};
