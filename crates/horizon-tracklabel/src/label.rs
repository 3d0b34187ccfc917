//! The label controller.
//!
//! [`TrackLabel`] owns the attachment state machine and the container, and
//! coordinates the content store and the placement geometry in response to
//! viewport notifications.
//!
//! # Lifecycle
//!
//! ```text
//! Detached --attach(viewport)--> Attached
//! Attached --close() / host-remove--> Detached
//! Attached --set_*--> Attached (mutates visible state)
//! Detached --set_position/set_content--> Detached (mutates cached state only)
//! ```
//!
//! A label is attached to at most one viewport at a time. The container is
//! created lazily on first attachment and survives detachment, so content
//! written once is still there on re-attach.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use horizon_tracklabel::{AnchorKind, LabelOptions, TrackLabel};
//! use horizon_tracklabel::geometry::{Direction, GeoPoint};
//!
//! let options = LabelOptions::new().with_direction(Direction::Auto).shared();
//! let label = TrackLabel::new(options, AnchorKind::Marker);
//!
//! label.set_content("MV Aurora — 12.4 kn");
//! label.set_position(GeoPoint::new(53.54, 8.58));
//! label.attach(host_viewport); // host map surface implementing Viewport
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::container::{Container, ContainerHandle};
use crate::content::LabelContent;
use crate::events::{EventDisposition, LabelEvents, PointerEvent, PointerEventKind};
use crate::geometry::{Direction, GeoPoint, Point, compute_placement};
use crate::options::LabelOptions;
use crate::viewport::{
    Layer, SubscriptionId, Viewport, ViewportEvent, ViewportEventKind, ViewportHandler,
};

/// The kind of anchor a label tracks.
///
/// Selects the default render layer: point markers sit in the marker layer,
/// paths get their labels in the overlay layer above them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// A point marker.
    Marker,
    /// A polyline or polygon.
    Path,
}

/// Mutable controller state, everything that changes after construction.
struct LabelState {
    content: Option<LabelContent>,
    /// Last payload accepted by a render pass. The cached `label_width` is
    /// only trusted while `content == previous_content`.
    previous_content: Option<LabelContent>,
    position: Option<GeoPoint>,
    label_width: f32,
    opacity: f32,
    z_index: Option<i32>,
    container: Option<ContainerHandle>,
    viewport: Option<Arc<dyn Viewport>>,
    subscriptions: Vec<SubscriptionId>,
    tap_subscription: Option<SubscriptionId>,
    tap_close_armed: bool,
    /// Whether this attachment follows zoom animation frames.
    animated: bool,
}

struct LabelShared {
    options: Arc<LabelOptions>,
    anchor_kind: AnchorKind,
    events: LabelEvents,
    state: Mutex<LabelState>,
}

/// A label that tracks a movable anchor on a map viewport.
///
/// `TrackLabel` is a cheap clonable handle; clones observe and mutate the
/// same label. Viewport subscriptions hold only weak references back to the
/// controller, so dropping every handle tears the label down even if a
/// sloppy host never unsubscribed it.
#[derive(Clone)]
pub struct TrackLabel {
    shared: Arc<LabelShared>,
}

impl TrackLabel {
    /// Create a detached label for an anchor of the given kind.
    pub fn new(options: Arc<LabelOptions>, anchor_kind: AnchorKind) -> Self {
        let opacity = options.opacity;
        Self {
            shared: Arc::new(LabelShared {
                options,
                anchor_kind,
                events: LabelEvents::new(),
                state: Mutex::new(LabelState {
                    content: None,
                    previous_content: None,
                    position: None,
                    label_width: 0.0,
                    opacity,
                    z_index: None,
                    container: None,
                    viewport: None,
                    subscriptions: Vec::new(),
                    tap_subscription: None,
                    tap_close_armed: false,
                    animated: false,
                }),
            }),
        }
    }

    /// The options this label was constructed from.
    pub fn options(&self) -> &Arc<LabelOptions> {
        &self.shared.options
    }

    /// The anchor kind this label tracks.
    pub fn anchor_kind(&self) -> AnchorKind {
        self.shared.anchor_kind
    }

    /// The label's observer surface (pointer event signals).
    pub fn events(&self) -> &LabelEvents {
        &self.shared.events
    }

    /// Whether the label is currently attached to a viewport.
    pub fn is_attached(&self) -> bool {
        self.shared.state.lock().viewport.is_some()
    }

    /// The label's container, if it has ever been attached.
    pub fn container(&self) -> Option<ContainerHandle> {
        self.shared.state.lock().container.clone()
    }

    /// The stored geographic position, if any.
    pub fn position(&self) -> Option<GeoPoint> {
        self.shared.state.lock().position
    }

    /// The stored content payload, if any.
    pub fn content(&self) -> Option<LabelContent> {
        self.shared.state.lock().content.clone()
    }

    /// Attach the label to a viewport.
    ///
    /// Creates the container on first attachment, inserts it into the
    /// configured render layer, renders content, computes placement, and
    /// subscribes to the viewport's notifications. On a touch-capable
    /// viewport with `no_hide` unset, also arms tap-to-close.
    ///
    /// Attaching to the viewport the label is already on is a no-op. The
    /// caller must detach before attaching to a *different* viewport;
    /// violating that precondition is not guarded; the label moves on, but
    /// its subscriptions on the old viewport leak until that viewport drops
    /// them. Misuse is reported at warn level.
    pub fn attach(&self, viewport: Arc<dyn Viewport>) {
        let shared = &self.shared;
        let (container, layer) = {
            let mut state = shared.state.lock();
            if let Some(current) = &state.viewport {
                if Arc::ptr_eq(current, &viewport) {
                    tracing::trace!(target: "horizon_tracklabel::label", "already attached to this viewport");
                    return;
                }
                tracing::warn!(
                    target: "horizon_tracklabel::label",
                    "attaching a label that is still attached elsewhere; \
                     subscriptions on the previous viewport will leak"
                );
            }
            let opacity = state.opacity;
            let z_index = state.z_index;
            let container = state
                .container
                .get_or_insert_with(|| {
                    Container::new(shared.options.class_name.clone(), opacity, z_index)
                })
                .clone();
            state.viewport = Some(viewport.clone());
            state.animated =
                viewport.supports_zoom_animation() && shared.options.zoom_animation;
            (container, shared.layer())
        };

        viewport.insert_into_layer(&layer, &container);
        if shared.options.clickable {
            container.set_interactive(true);
        }

        // Initial render + placement before any notification can arrive.
        shared.refresh();

        let subscriptions = vec![
            viewport.subscribe(ViewportEventKind::MoveEnd, shared.handler()),
            viewport.subscribe(ViewportEventKind::ViewReset, shared.handler()),
        ];
        let zoom_subscription = {
            let state = shared.state.lock();
            state.animated
        }
        .then(|| viewport.subscribe(ViewportEventKind::ZoomFrame, shared.handler()));

        let tap_subscription = (viewport.is_touch_capable() && !shared.options.no_hide)
            .then(|| viewport.subscribe(ViewportEventKind::BackgroundTap, shared.handler()));

        {
            let mut state = shared.state.lock();
            state.subscriptions = subscriptions;
            state.subscriptions.extend(zoom_subscription);
            state.tap_close_armed = tap_subscription.is_some();
            state.tap_subscription = tap_subscription;
        }
        tracing::debug!(target: "horizon_tracklabel::label", layer = ?layer, "label attached");
    }

    /// Detach the label from its viewport.
    ///
    /// The container is removed from the render tree but retained for
    /// re-attachment; all subscriptions (including tap-to-close) are
    /// released. Calling this on a detached label is a no-op.
    pub fn detach(&self) {
        self.shared.detach();
    }

    /// Close the label: disarm tap-to-close, then ask the viewport to drop
    /// the container from its render tree and detach. No-op when detached.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Store the geographic position the label tracks. When attached, the
    /// screen placement is recomputed immediately; when detached, the
    /// position is kept for the next attachment.
    pub fn set_position(&self, position: GeoPoint) {
        let attached = {
            let mut state = self.shared.state.lock();
            state.position = Some(position);
            state.viewport.is_some()
        };
        if attached {
            self.shared.refresh_position();
        }
    }

    /// Store a new content payload and run a render pass.
    ///
    /// The store always updates, even while detached; the container only
    /// changes once the label is attached. Setting a payload equal to the
    /// last rendered one is a no-op (no write, no re-measurement).
    pub fn set_content(&self, content: impl Into<LabelContent>) {
        {
            let mut state = self.shared.state.lock();
            state.content = Some(content.into());
        }
        self.shared.render();
    }

    /// Set the container opacity. Applied immediately if the container
    /// exists, otherwise deferred until it is created.
    pub fn set_opacity(&self, opacity: f32) {
        let container = {
            let mut state = self.shared.state.lock();
            state.opacity = opacity;
            state.container.clone()
        };
        if let Some(container) = container {
            container.set_opacity(opacity);
        }
    }

    /// Set the stacking order. Applied immediately if the container exists,
    /// otherwise deferred until it is created.
    pub fn set_z_index(&self, z_index: i32) {
        let container = {
            let mut state = self.shared.state.lock();
            state.z_index = Some(z_index);
            state.container.clone()
        };
        if let Some(container) = container {
            container.set_z_index(z_index);
        }
    }

    /// Deliver a pointer event that hit the container.
    ///
    /// Forwards through the event relay when the label is clickable and
    /// attached, and honors tap-to-close. The returned disposition tells the
    /// host what to suppress on its platform event.
    pub fn dispatch_pointer(&self, event: PointerEvent) -> EventDisposition {
        let (relay_active, tap_armed) = {
            let state = self.shared.state.lock();
            (
                self.shared.options.clickable && state.viewport.is_some(),
                state.tap_close_armed,
            )
        };
        let disposition = if relay_active {
            self.shared.events.relay(event)
        } else {
            EventDisposition::NONE
        };
        if tap_armed && event.kind == PointerEventKind::PrimaryClick {
            self.shared.close();
        }
        disposition
    }
}

impl LabelShared {
    /// The render layer this label inserts into.
    fn layer(&self) -> Layer {
        match &self.options.pane {
            Some(pane) => Layer::Named(pane.clone()),
            None => match self.anchor_kind {
                AnchorKind::Marker => Layer::Markers,
                AnchorKind::Path => Layer::Overlays,
            },
        }
    }

    /// Build the viewport handler for this label. Holds only a weak
    /// reference, so an undisposed subscription cannot keep the label alive.
    fn handler(self: &Arc<Self>) -> ViewportHandler {
        let weak: Weak<Self> = Arc::downgrade(self);
        Arc::new(move |event| {
            let Some(shared) = weak.upgrade() else { return };
            match *event {
                ViewportEvent::MoveEnd => shared.on_move_end(),
                ViewportEvent::ViewReset { hard } => {
                    if hard {
                        shared.refresh();
                    }
                }
                ViewportEvent::ZoomFrame { zoom, center } => shared.on_zoom_frame(zoom, center),
                ViewportEvent::BackgroundTap { .. } => {
                    let armed = shared.state.lock().tap_close_armed;
                    if armed {
                        shared.close();
                    }
                }
            }
        })
    }

    fn detach(&self) {
        let (viewport, container, subscriptions, tap_subscription) = {
            let mut state = self.state.lock();
            let Some(viewport) = state.viewport.take() else {
                return;
            };
            state.tap_close_armed = false;
            state.animated = false;
            (
                viewport,
                state.container.clone(),
                std::mem::take(&mut state.subscriptions),
                state.tap_subscription.take(),
            )
        };
        if let Some(container) = &container {
            viewport.remove_from_layer(container);
            container.set_interactive(false);
        }
        for id in subscriptions {
            viewport.unsubscribe(id);
        }
        if let Some(id) = tap_subscription {
            viewport.unsubscribe(id);
        }
        tracing::debug!(target: "horizon_tracklabel::label", "label detached");
    }

    fn close(&self) {
        // Tap-to-close goes first so a re-entrant background tap cannot
        // close twice; removal itself is the viewport's job via detach.
        let tap = {
            let mut state = self.state.lock();
            if state.viewport.is_none() {
                return;
            }
            state.tap_close_armed = false;
            state
                .tap_subscription
                .take()
                .and_then(|id| state.viewport.clone().map(|viewport| (viewport, id)))
        };
        if let Some((viewport, id)) = tap {
            viewport.unsubscribe(id);
        }
        self.detach();
    }

    /// Full refresh: content and placement, with the container hidden in
    /// between so a half-updated label is never visible.
    fn refresh(&self) {
        let container = {
            let state = self.state.lock();
            if state.viewport.is_none() {
                return;
            }
            state.container.clone()
        };
        let Some(container) = container else { return };
        container.set_visible(false);
        self.render();
        self.refresh_position();
        container.set_visible(true);
    }

    /// Content render pass. No-op without a payload, without a viewport, or
    /// when the payload equals the last rendered one (cheap value equality,
    /// the deliberate skip contract). Otherwise writes the markup and
    /// re-measures the label width.
    fn render(&self) {
        let (viewport, container, content) = {
            let state = self.state.lock();
            let (Some(viewport), Some(container), Some(content)) = (
                state.viewport.clone(),
                state.container.clone(),
                state.content.clone(),
            ) else {
                return;
            };
            if content.is_empty() || state.previous_content.as_ref() == Some(&content) {
                return;
            }
            (viewport, container, content)
        };

        let size = viewport.measure(&content);
        container.set_markup(content.clone(), size.width);

        let mut state = self.state.lock();
        state.label_width = size.width;
        state.previous_content = Some(content);
        tracing::trace!(target: "horizon_tracklabel::label", width = size.width, "content rendered");
    }

    /// Recompute placement from the current view state.
    fn refresh_position(&self) {
        let Some((viewport, container, position, width)) = self.placement_inputs() else {
            return;
        };
        let anchor = viewport.project(position);
        self.place(&viewport, &container, anchor, width);
    }

    /// Placement against an in-flight zoom animation frame. Called at
    /// animation cadence; one placement per frame, no coalescing.
    fn on_zoom_frame(&self, zoom: f64, center: GeoPoint) {
        let Some((viewport, container, position, width)) = self.placement_inputs() else {
            return;
        };
        let anchor = viewport.project_during_zoom(position, zoom, center).round();
        self.place(&viewport, &container, anchor, width);
    }

    fn on_move_end(&self) {
        let animated = self.state.lock().animated;
        // Animated labels were already carried by the zoom frames; auto
        // direction still has to re-evaluate its side against the new center.
        if !animated || self.options.direction == Direction::Auto {
            self.refresh_position();
        }
    }

    fn placement_inputs(&self) -> Option<(Arc<dyn Viewport>, ContainerHandle, GeoPoint, f32)> {
        let state = self.state.lock();
        Some((
            state.viewport.clone()?,
            state.container.clone()?,
            state.position?,
            state.label_width,
        ))
    }

    fn place(
        &self,
        viewport: &Arc<dyn Viewport>,
        container: &ContainerHandle,
        anchor: Point,
        label_width: f32,
    ) {
        let center = viewport.project(viewport.center());
        let (position, side) = compute_placement(
            anchor,
            center,
            self.options.direction,
            self.options.offset,
            label_width,
        );
        container.place(position, side);
        tracing::trace!(
            target: "horizon_tracklabel::label",
            x = position.x,
            y = position.y,
            ?side,
            "label placed"
        );
    }
}

static_assertions::assert_impl_all!(TrackLabel: Send, Sync);
