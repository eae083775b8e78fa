use crate::{
    input::events::{EventKind, MapEvent},
    prelude::HashMap,
};

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Handle returned by [`EventManager::on`], used to unregister the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    kind: EventKind,
    id: u64,
}

impl ListenerKey {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type, in registration order
    listeners: HashMap<EventKind, Vec<(u64, EventCallback)>>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerKey
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        ListenerKey { kind, id }
    }

    /// Unregister a listener. Returns false if the key was already gone.
    pub fn un(&mut self, key: ListenerKey) -> bool {
        let Some(callbacks) = self.listeners.get_mut(&key.kind) else {
            return false;
        };
        let before = callbacks.len();
        callbacks.retain(|(id, _)| *id != key.id);
        before != callbacks.len()
    }

    /// Deliver an event to every listener of its kind; returns how many ran
    pub fn dispatch(&self, event: &MapEvent) -> usize {
        let Some(callbacks) = self.listeners.get(&event.kind()) else {
            return 0;
        };
        for (_, callback) in callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Number of listeners registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, callbacks)| (kind.as_str(), callbacks.len()))
            .collect();
        f.debug_struct("EventManager")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::Map;
    use crate::core::geo::{LatLng, Point};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn view_event() -> MapEvent {
        let map = Map::new(LatLng::new(0.0, 0.0), 2.0, Point::new(200.0, 100.0));
        MapEvent::ViewChanged {
            frame: map.frame_state(),
        }
    }

    #[test]
    fn test_register_dispatch_unregister() {
        let mut events = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let key = events.on(EventKind::ViewChanged, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(events.listener_count(EventKind::ViewChanged), 1);

        assert_eq!(events.dispatch(&view_event()), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(events.un(key));
        assert!(!events.un(key));
        assert_eq!(events.dispatch(&view_event()), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_only_matching_kind() {
        let mut events = EventManager::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        events.on(EventKind::SizeChanged, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        events.dispatch(&view_event());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
