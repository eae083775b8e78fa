//! The print layout control.
//!
//! A `PrintLayout` draws a paper sheet over the map and keeps track of the map
//! extent under the sheet's printable area. It owns its configuration; the
//! host map only drives it through render callbacks and view/size listeners.

use crate::{
    core::{
        extent::Extent,
        frame::FrameState,
        map::{MapId, WeakMapHandle},
        projection::Projection,
    },
    input::{EventKind, EventManager, ListenerKey},
    print::{
        config::{PrintConfig, PrintLayoutOptions},
        events::{ChangeKind, Observers, PrintLayoutEvent, PrintLayoutSnapshot, SubscriptionId},
        layout::{
            compute_bounding_box, compute_layout, printable_size_mm, scale_denominator,
            size_in_dots, PaperLayout,
        },
        paper::{DotSize, Margins, Orientation, PaperFormat, PaperSize},
    },
    ui::controls::{Control, ControlId, RenderContext},
    MapError, Result,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const CONTROL_NAME: &str = "print-layout";

/// Where the overlay is in its attach/detach lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentState {
    /// Never rendered by a host
    Unattached,
    Attached(MapId),
    /// Removed from the host it was attached to; may attach again
    Detached,
}

/// Host-side registrations made when the overlay attached
#[derive(Debug, Clone)]
struct Attachment {
    map_id: MapId,
    host: Option<WeakMapHandle>,
    view_key: ListenerKey,
    size_key: ListenerKey,
}

#[derive(Debug)]
enum Lifecycle {
    Unattached,
    Attached(Attachment),
    Detached,
}

#[derive(Debug)]
struct PrintLayoutState {
    config: PrintConfig,
    dpi: f64,
    layout: PaperLayout,
    /// Last host snapshot seen while attached
    frame: Option<FrameState>,
    bounding_box: Option<Extent>,
    /// Reference handed over by the host, see `Control::set_map`
    host: Option<WeakMapHandle>,
    /// Map whose controls currently hold this overlay
    owner: Option<MapId>,
    lifecycle: Lifecycle,
}

impl PrintLayoutState {
    fn attachment(&self) -> Option<&Attachment> {
        match &self.lifecycle {
            Lifecycle::Attached(attachment) => Some(attachment),
            _ => None,
        }
    }

    fn attached_to(&self) -> Option<MapId> {
        self.attachment().map(|attachment| attachment.map_id)
    }

    fn relayout(&mut self) {
        let size = self.frame.as_ref().map(FrameState::size).unwrap_or_default();
        self.layout = compute_layout(&self.config, size);
    }

    fn update_bounding_box(&mut self) {
        self.bounding_box = match (self.attachment(), &self.frame) {
            (Some(_), Some(frame)) => Some(compute_bounding_box(&self.layout, frame)),
            _ => None,
        };
    }

    fn snapshot(&self) -> PrintLayoutSnapshot {
        PrintLayoutSnapshot {
            config: self.config,
            layout: self.layout,
            size_mm: printable_size_mm(&self.config),
            bounding_box: self.bounding_box,
            attached_to: self.attached_to(),
        }
    }
}

#[derive(Debug)]
struct Shared {
    state: Mutex<PrintLayoutState>,
    observers: Observers,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, PrintLayoutState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, kind: ChangeKind, snapshot: PrintLayoutSnapshot) {
        self.observers.notify(&PrintLayoutEvent { kind, snapshot });
    }

    fn on_view_changed(&self, frame: &FrameState) {
        let snapshot = {
            let mut state = self.state();
            if state.attached_to() != Some(frame.map_id) {
                return;
            }
            state.frame = Some(frame.clone());
            state.update_bounding_box();
            state.snapshot()
        };
        self.notify(ChangeKind::BoundingBox, snapshot);
    }

    fn on_size_changed(&self, frame: &FrameState) {
        let snapshot = {
            let mut state = self.state();
            if state.attached_to() != Some(frame.map_id) {
                return;
            }
            state.frame = Some(frame.clone());
            state.relayout();
            state.update_bounding_box();
            state.snapshot()
        };
        log::debug!(
            "print layout resized to {:.0}x{:.0}px",
            snapshot.layout.frame.width(),
            snapshot.layout.frame.height()
        );
        self.notify(ChangeKind::Layout, snapshot);
    }
}

/// Paper sheet overlay bound to one host map at a time
#[derive(Debug)]
pub struct PrintLayout {
    id: ControlId,
    shared: Arc<Shared>,
}

impl PrintLayout {
    pub fn new(options: PrintLayoutOptions) -> Result<Self> {
        Ok(Self::from_options(options.validate()?))
    }

    fn from_options(options: PrintLayoutOptions) -> Self {
        let config = options.config;
        let state = PrintLayoutState {
            config,
            dpi: options.dpi,
            layout: compute_layout(&config, Default::default()),
            frame: None,
            bounding_box: None,
            host: None,
            owner: None,
            lifecycle: Lifecycle::Unattached,
        };
        Self {
            id: ControlId::next(),
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                observers: Observers::default(),
            }),
        }
    }

    pub fn config(&self) -> PrintConfig {
        self.shared.state().config
    }

    pub fn format(&self) -> PaperFormat {
        self.config().format
    }

    pub fn orientation(&self) -> Orientation {
        self.config().orientation
    }

    pub fn margins(&self) -> Margins {
        self.config().margins
    }

    /// Resolution used by [`PrintLayout::print_box_size_in_dots`] by default
    pub fn dpi(&self) -> f64 {
        self.shared.state().dpi
    }

    /// Sets the orientation from its name, case-insensitively
    pub fn set_orientation(&self, value: &str) -> Result<()> {
        let orientation = value.parse::<Orientation>().inspect_err(|_| {
            log::warn!("rejected print orientation {:?}", value);
        })?;
        self.update(ChangeKind::Orientation, |config| {
            config.orientation = orientation;
        });
        Ok(())
    }

    /// Sets the paper format from its name, case-insensitively
    pub fn set_format(&self, value: &str) -> Result<()> {
        let format = value.parse::<PaperFormat>().inspect_err(|_| {
            log::warn!("rejected paper format {:?}", value);
        })?;
        self.update(ChangeKind::Format, |config| config.format = format);
        Ok(())
    }

    /// Replaces the margins. Negative fields are stored as zero; `None` is ignored.
    pub fn set_margins(&self, margins: Option<Margins>) {
        let Some(margins) = margins else {
            return;
        };
        self.update(ChangeKind::Margins, |config| {
            config.margins = margins.clamped();
        });
    }

    /// Applies format, orientation and margins in one step
    pub fn set_config(&self, config: PrintConfig) {
        self.update(ChangeKind::Config, |current| {
            *current = PrintConfig {
                margins: config.margins.clamped(),
                ..config
            };
        });
    }

    /// Mutate, lay out, let the host render, recompute, then notify
    fn update<F>(&self, kind: ChangeKind, apply: F)
    where
        F: FnOnce(&mut PrintConfig),
    {
        let attached = {
            let mut state = self.shared.state();
            apply(&mut state.config);
            state.relayout();
            state.attachment().is_some()
        };

        if attached {
            self.render_host();
        }

        let snapshot = {
            let mut state = self.shared.state();
            state.update_bounding_box();
            state.snapshot()
        };
        self.shared.notify(kind, snapshot);
    }

    /// Runs a synchronous render pass on the host if it is reachable and idle.
    /// When called from inside one of the host's own callbacks the host is
    /// busy and the state computed by that callback is already current.
    fn render_host(&self) {
        let host = self
            .shared
            .state()
            .attachment()
            .and_then(|attachment| attachment.host.clone());
        let Some(handle) = host.and_then(|weak| weak.upgrade()) else {
            return;
        };
        let Some(mut map) = handle.try_lock() else {
            log::trace!("map {:?} is busy, skipping forced render", handle.id());
            return;
        };
        if let Err(err) = map.render() {
            log::warn!("render of map {:?} failed: {}", handle.id(), err);
        }
    }

    /// Pixel geometry of the sheet relative to the map container
    pub fn layout(&self) -> PaperLayout {
        self.shared.state().layout
    }

    /// Map extent under the printable area in the map's projection
    pub fn bounding_box(&self) -> Option<Extent> {
        if !self.is_attached() {
            return None;
        }
        self.render_host();
        self.shared.state().bounding_box
    }

    /// [`PrintLayout::bounding_box`] in longitude/latitude
    pub fn bounding_box_lon_lat(&self) -> Option<Extent> {
        let bbox = self.bounding_box()?;
        let projection = self.shared.state().frame.as_ref()?.projection;
        Some(projection.transform_extent(&bbox, Projection::LonLat))
    }

    pub fn print_box_size_in_millimeters(&self) -> PaperSize {
        printable_size_mm(&self.config())
    }

    /// Printable size in device dots; `None` uses the configured resolution
    pub fn print_box_size_in_dots(&self, dpi: Option<f64>) -> DotSize {
        let dpi = dpi.unwrap_or_else(|| self.dpi());
        size_in_dots(self.print_box_size_in_millimeters(), dpi)
    }

    /// The N of a 1:N print scale for the current view
    pub fn print_scale_denominator(&self) -> Option<f64> {
        let lon_lat = self.bounding_box_lon_lat()?;
        scale_denominator(&lon_lat, self.print_box_size_in_millimeters().width)
    }

    pub fn attachment_state(&self) -> AttachmentState {
        match &self.shared.state().lifecycle {
            Lifecycle::Unattached => AttachmentState::Unattached,
            Lifecycle::Attached(attachment) => AttachmentState::Attached(attachment.map_id),
            Lifecycle::Detached => AttachmentState::Detached,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.shared.state().attachment().is_some()
    }

    pub fn attached_map(&self) -> Option<MapId> {
        self.shared.state().attached_to()
    }

    pub fn snapshot(&self) -> PrintLayoutSnapshot {
        self.shared.state().snapshot()
    }

    /// Registers a callback fired after every state-affecting update
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PrintLayoutEvent) + Send + Sync + 'static,
    {
        self.shared.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    fn attach(&self, context: &mut RenderContext<'_>) {
        let map_id = context.map_id();

        let weak = Arc::downgrade(&self.shared);
        let view_key = context.events.on(EventKind::ViewChanged, move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_view_changed(event.frame());
            }
        });
        let weak = Arc::downgrade(&self.shared);
        let size_key = context.events.on(EventKind::SizeChanged, move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_size_changed(event.frame());
            }
        });

        let snapshot = {
            let mut state = self.shared.state();
            let host = state.host.clone().filter(|host| host.id() == map_id);
            state.lifecycle = Lifecycle::Attached(Attachment {
                map_id,
                host,
                view_key,
                size_key,
            });
            state.frame = Some(context.frame.clone());
            state.relayout();
            state.update_bounding_box();
            state.snapshot()
        };

        log::debug!("print layout {:?} attached to map {:?}", self.id, map_id);
        self.shared.notify(ChangeKind::Attached, snapshot);
    }
}

impl Default for PrintLayout {
    fn default() -> Self {
        Self::from_options(PrintLayoutOptions::default())
    }
}

impl Control for PrintLayout {
    fn id(&self) -> ControlId {
        self.id
    }

    fn name(&self) -> &str {
        CONTROL_NAME
    }

    fn on_add(&self, map: MapId) -> Result<()> {
        let mut state = self.shared.state();
        match state.owner {
            Some(owner) if owner != map => Err(MapError::Control(format!(
                "print layout {:?} is already on map {:?}",
                self.id, owner
            ))),
            _ => {
                state.owner = Some(map);
                Ok(())
            }
        }
    }

    fn set_map(&self, map: Option<WeakMapHandle>) {
        let previous = {
            let mut state = self.shared.state();
            let previous = state.host.take();
            state.host = map.clone();
            previous
        };

        // Moving to another map takes the overlay off the old one first
        if let Some(previous) = previous {
            let moved = map.as_ref().map_or(true, |next| next.id() != previous.id());
            if moved {
                if let Some(old) = previous.upgrade() {
                    let removed = match old.try_lock() {
                        Some(mut old_map) => old_map.remove_control(self.id).map(|_| ()),
                        None => Err(MapError::Control(format!("map {:?} is busy", old.id()))),
                    };
                    if let Err(err) = removed {
                        log::warn!("print layout not removed from {:?}: {}", old.id(), err);
                    }
                }
                // removal cleared the host reference; restore the new one
                self.shared.state().host = map;
            }
        }
    }

    fn render(&self, context: &mut RenderContext<'_>) -> Result<()> {
        let map_id = context.map_id();

        {
            let mut state = self.shared.state();
            match state.attached_to() {
                Some(attached) if attached == map_id => {
                    if state.frame.as_ref() != Some(context.frame) {
                        state.frame = Some(context.frame.clone());
                        state.relayout();
                        state.update_bounding_box();
                    }
                    return Ok(());
                }
                Some(attached) => {
                    return Err(MapError::Control(format!(
                        "print layout {:?} is attached to map {:?}, not {:?}",
                        self.id, attached, map_id
                    )));
                }
                None => {}
            }
        }

        self.attach(context);
        Ok(())
    }

    fn on_remove(&self, events: &mut EventManager) -> Result<()> {
        let snapshot = {
            let mut state = self.shared.state();
            state.host = None;
            state.owner = None;
            match std::mem::replace(&mut state.lifecycle, Lifecycle::Detached) {
                Lifecycle::Attached(attachment) => {
                    events.un(attachment.view_key);
                    events.un(attachment.size_key);
                    log::debug!(
                        "print layout {:?} detached from map {:?}",
                        self.id,
                        attachment.map_id
                    );
                }
                other => {
                    state.lifecycle = other;
                    return Ok(());
                }
            }
            state.frame = None;
            state.bounding_box = None;
            state.snapshot()
        };

        self.shared.notify(ChangeKind::Detached, snapshot);
        Ok(())
    }
}
