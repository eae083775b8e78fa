use crate::{
    core::{extent::Extent, map::MapId},
    print::{config::PrintConfig, layout::PaperLayout, paper::PaperSize},
};
use std::sync::{Arc, Mutex, PoisonError};

/// What caused a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Format,
    Orientation,
    Margins,
    Config,
    /// The host view moved and the bounding box followed
    BoundingBox,
    /// The host was resized and the sheet was laid out again
    Layout,
    Attached,
    Detached,
}

/// Derived state at the time of a notification
#[derive(Debug, Clone, PartialEq)]
pub struct PrintLayoutSnapshot {
    pub config: PrintConfig,
    pub layout: PaperLayout,
    pub size_mm: PaperSize,
    /// Native projection, `None` while detached
    pub bounding_box: Option<Extent>,
    pub attached_to: Option<MapId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintLayoutEvent {
    pub kind: ChangeKind,
    pub snapshot: PrintLayoutSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Observer = Arc<dyn Fn(&PrintLayoutEvent) + Send + Sync>;

/// Registry of change observers
#[derive(Default)]
pub struct Observers {
    inner: Mutex<ObserverList>,
}

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PrintLayoutEvent) + Send + Sync + 'static,
    {
        let mut list = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        list.next_id += 1;
        let id = SubscriptionId(list.next_id);
        list.entries.push((id, Arc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut list = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = list.entries.len();
        list.entries.retain(|(entry, _)| *entry != id);
        before != list.entries.len()
    }

    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    /// Calls every observer; the registry is not locked while they run
    pub fn notify(&self, event: &PrintLayoutEvent) {
        let observers: Vec<Observer> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            observer(event);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers").field("len", &self.len()).finish()
    }
}
