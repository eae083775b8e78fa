use crate::{
    core::{
        bounds::Bounds,
        frame::FrameState,
        geo::{LatLng, Point},
        projection::Projection,
        viewport::Viewport,
    },
    input::{EventKind, EventManager, MapEvent},
    ui::controls::{Control, ControlId, ControlManager, RenderContext},
    MapError, Result,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a map instance. Controls key their attachment on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(u64);

impl MapId {
    pub fn next() -> Self {
        Self(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The host map: view state, container geometry, listeners and controls
#[derive(Debug)]
pub struct Map {
    id: MapId,
    viewport: Viewport,
    /// Top-left corner of the map container in screen coordinates
    container_origin: Point,
    projection: Projection,
    events: EventManager,
    controls: ControlManager,
    render_count: u64,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            id: MapId::next(),
            viewport: Viewport::new(center, zoom, size),
            container_origin: Point::default(),
            projection: Projection::default(),
            events: EventManager::new(),
            controls: ControlManager::new(),
            render_count: 0,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_container_origin(mut self, origin: Point) -> Self {
        self.container_origin = origin;
        self
    }

    /// Moves the map behind a shared handle so controls can reach it
    pub fn into_handle(self) -> MapHandle {
        MapHandle {
            id: self.id,
            inner: Arc::new(Mutex::new(self)),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn size(&self) -> Point {
        self.viewport.size
    }

    /// Container rectangle in screen coordinates
    pub fn container(&self) -> Bounds {
        let size = self.viewport.size;
        Bounds::from_origin_and_size(self.container_origin, size.x, size.y)
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            map_id: self.id,
            viewport: self.viewport.clone(),
            container: self.container(),
            projection: self.projection,
        }
    }

    /// Converts a container pixel into a coordinate of the map projection
    pub fn pixel_to_coordinate(&self, pixel: &Point) -> Point {
        self.viewport.pixel_to_coordinate(pixel, self.projection)
    }

    /// Set the map view to a specific center and zoom
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.emit(EventKind::ViewChanged);
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.viewport.set_center(center);
        self.emit(EventKind::ViewChanged);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.emit(EventKind::ViewChanged);
    }

    /// Zoom keeping `focus_point` (container pixels) in place
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        self.viewport.zoom_to(zoom, focus_point);
        self.emit(EventKind::ViewChanged);
    }

    pub fn pan(&mut self, delta: Point) -> Point {
        let applied = self.viewport.pan(delta);
        self.emit(EventKind::ViewChanged);
        applied
    }

    /// Resizes the map container
    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
        self.emit(EventKind::SizeChanged);
    }

    fn emit(&self, kind: EventKind) {
        let frame = self.frame_state();
        let event = match kind {
            EventKind::ViewChanged => MapEvent::ViewChanged { frame },
            EventKind::SizeChanged => MapEvent::SizeChanged { frame },
            EventKind::PostRender => MapEvent::PostRender { frame },
        };
        let delivered = self.events.dispatch(&event);
        log::trace!("{} delivered to {} listeners", kind, delivered);
    }

    /// Synchronous render pass: every control's render callback runs once
    pub fn render(&mut self) -> Result<()> {
        let frame = self.frame_state();
        for control in self.controls.iter() {
            let mut context = RenderContext {
                frame: &frame,
                events: &mut self.events,
            };
            control.render(&mut context)?;
        }
        self.render_count += 1;
        self.events.dispatch(&MapEvent::PostRender { frame });
        Ok(())
    }

    /// Number of completed render passes
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Register a listener for host notifications
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> crate::input::ListenerKey
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn un(&mut self, key: crate::input::ListenerKey) -> bool {
        self.events.un(key)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.events.listener_count(kind)
    }

    pub fn add_control(&mut self, control: Arc<dyn Control>) -> Result<ControlId> {
        let id = control.id();
        if self.controls.contains(id) {
            return Err(MapError::Control(format!(
                "control {:?} is already on this map",
                id
            )));
        }
        control.on_add(self.id)?;
        self.controls.add(control);
        Ok(id)
    }

    /// Takes a control off the map and signals the removal to it
    pub fn remove_control(&mut self, id: ControlId) -> Result<Option<Arc<dyn Control>>> {
        let Some(control) = self.controls.remove(id) else {
            return Ok(None);
        };
        control.on_remove(&mut self.events)?;
        Ok(Some(control))
    }

    pub fn has_control(&self, id: ControlId) -> bool {
        self.controls.contains(id)
    }
}

/// Shared, lockable map. Controls hold the weak half.
#[derive(Debug, Clone)]
pub struct MapHandle {
    id: MapId,
    inner: Arc<Mutex<Map>>,
}

impl MapHandle {
    pub fn new(map: Map) -> Self {
        map.into_handle()
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, Map> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `None` while the map is busy, e.g. when called from inside one
    /// of its own callbacks
    pub fn try_lock(&self) -> Option<MutexGuard<'_, Map>> {
        match self.inner.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    pub fn downgrade(&self) -> WeakMapHandle {
        WeakMapHandle {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Hands a control a reference back to this map, then adds it. A control
    /// still on another map leaves that map through its `set_map`.
    pub fn add_control(&self, control: Arc<dyn Control>) -> Result<ControlId> {
        control.set_map(Some(self.downgrade()));
        self.lock().add_control(control)
    }

    pub fn remove_control(&self, id: ControlId) -> Result<Option<Arc<dyn Control>>> {
        self.lock().remove_control(id)
    }

    pub fn render(&self) -> Result<()> {
        self.lock().render()
    }
}

/// Non-owning reference to a [`MapHandle`]
#[derive(Debug, Clone)]
pub struct WeakMapHandle {
    id: MapId,
    inner: Weak<Mutex<Map>>,
}

impl WeakMapHandle {
    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn upgrade(&self) -> Option<MapHandle> {
        self.inner.upgrade().map(|inner| MapHandle { id: self.id, inner })
    }
}
