use crate::{
    core::{frame::FrameState, map::MapId, map::WeakMapHandle},
    input::handler::EventManager,
    Result,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a control instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    pub fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a control gets to see during a render pass
pub struct RenderContext<'a> {
    pub frame: &'a FrameState,
    /// The host's listener registry; controls subscribe to host events here
    pub events: &'a mut EventManager,
}

impl RenderContext<'_> {
    pub fn map_id(&self) -> MapId {
        self.frame.map_id
    }
}

/// A component living on top of the map, driven by host callbacks
pub trait Control: Send + Sync {
    fn id(&self) -> ControlId;

    fn name(&self) -> &str;

    /// Invoked by the host before the control joins its controls; an error
    /// keeps the control off that map
    fn on_add(&self, _map: MapId) -> Result<()> {
        Ok(())
    }

    /// Hands the control a reference to its host (or takes it away)
    fn set_map(&self, _map: Option<WeakMapHandle>) {}

    /// Invoked by the host on every render pass
    fn render(&self, context: &mut RenderContext<'_>) -> Result<()>;

    /// Invoked by the host after the control was taken out of its controls
    fn on_remove(&self, _events: &mut EventManager) -> Result<()> {
        Ok(())
    }
}

/// Ordered collection of the controls attached to one map
#[derive(Default)]
pub struct ControlManager {
    controls: Vec<Arc<dyn Control>>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control; returns false if a control with that id is already present
    pub fn add(&mut self, control: Arc<dyn Control>) -> bool {
        if self.contains(control.id()) {
            return false;
        }
        self.controls.push(control);
        true
    }

    pub fn remove(&mut self, id: ControlId) -> Option<Arc<dyn Control>> {
        let index = self.controls.iter().position(|c| c.id() == id)?;
        Some(self.controls.remove(index))
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.iter().any(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Control>> {
        self.controls.iter()
    }
}

impl std::fmt::Debug for ControlManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.controls.iter().map(|c| c.name()))
            .finish()
    }
}
