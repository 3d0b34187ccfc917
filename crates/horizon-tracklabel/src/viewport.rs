//! The viewport collaborator contract.
//!
//! The viewport is the host map surface: it owns projection, render layers
//! and input. Labels consume this trait; they never implement it. A single
//! viewport is shared by many labels, so everything a label asks of it
//! (subscribe/unsubscribe, insert/remove) is additive and order-independent
//! across labels.

use std::sync::Arc;

use crate::container::ContainerHandle;
use crate::content::LabelContent;
use crate::geometry::{GeoPoint, Point, Size};

/// Callback registered for viewport notifications.
pub type ViewportHandler = Arc<dyn Fn(&ViewportEvent) + Send + Sync>;

/// Opaque identifier for a viewport subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Notifications a viewport delivers to subscribed labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// A pan or zoom interaction settled.
    MoveEnd,
    /// The view was reset. Only a hard reset (projection change, crossing a
    /// zoom threshold) forces a full content + position refresh; soft resets
    /// are ignored by labels.
    ViewReset {
        hard: bool,
    },
    /// One frame of a continuous zoom animation, carrying the in-flight
    /// target zoom and center. Delivered at animation cadence; labels apply
    /// placement on every frame they receive.
    ZoomFrame {
        zoom: f64,
        center: GeoPoint,
    },
    /// A tap or click on the viewport background (not on a label).
    BackgroundTap {
        position: Point,
    },
}

/// The notification kinds a label can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEventKind {
    MoveEnd,
    ViewReset,
    ZoomFrame,
    BackgroundTap,
}

impl ViewportEvent {
    /// The subscription kind this event is delivered under.
    pub fn kind(&self) -> ViewportEventKind {
        match self {
            Self::MoveEnd => ViewportEventKind::MoveEnd,
            Self::ViewReset { .. } => ViewportEventKind::ViewReset,
            Self::ZoomFrame { .. } => ViewportEventKind::ZoomFrame,
            Self::BackgroundTap { .. } => ViewportEventKind::BackgroundTap,
        }
    }
}

/// A render layer of the viewport.
///
/// Containers are stacked into named layers; the viewport decides what each
/// layer means visually. Labels pick [`Layer::Markers`] for point-marker
/// anchors and [`Layer::Overlays`] for path anchors unless the options name
/// an explicit pane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The layer point markers render into.
    Markers,
    /// The overlay layer above paths.
    Overlays,
    /// A host-defined layer.
    Named(String),
}

/// The host map surface a label attaches to.
///
/// # Handler re-entrancy
///
/// Implementations must not hold internal locks while invoking subscribed
/// handlers: a handler may subscribe, unsubscribe, or remove its own
/// container from a layer on the same call stack (closing a label from a
/// background tap does exactly that). Snapshot the handler list, release
/// the lock, then dispatch.
pub trait Viewport: Send + Sync {
    /// Project a geographic coordinate to screen space at the current view
    /// state.
    fn project(&self, position: GeoPoint) -> Point;

    /// Project a geographic coordinate against an in-flight zoom animation
    /// frame described by its target zoom and center.
    fn project_during_zoom(&self, position: GeoPoint, zoom: f64, center: GeoPoint) -> Point;

    /// The geographic center of the current view.
    fn center(&self) -> GeoPoint;

    /// Register a handler for one notification kind. The handler stays
    /// registered until [`unsubscribe`](Self::unsubscribe) is called with
    /// the returned id.
    fn subscribe(&self, kind: ViewportEventKind, handler: ViewportHandler) -> SubscriptionId;

    /// Remove a previously registered handler. Returns `false` if the id is
    /// unknown (already unsubscribed).
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Insert a container into a render layer.
    fn insert_into_layer(&self, layer: &Layer, container: &ContainerHandle);

    /// Remove a container from its render layer. The viewport is the
    /// authority over its render tree; labels request removal here rather
    /// than mutating layers themselves.
    fn remove_from_layer(&self, container: &ContainerHandle);

    /// Lay out `content` and return its rendered size. This call is
    /// synchronous: hosts with asynchronous layout must flush before
    /// returning, because the caller treats the width as immediately valid.
    fn measure(&self, content: &LabelContent) -> Size;

    /// Whether the viewport receives touch input.
    fn is_touch_capable(&self) -> bool;

    /// Whether the viewport animates zoom continuously. Labels only follow
    /// zoom frames when both this and their `zoom_animation` option hold.
    fn supports_zoom_animation(&self) -> bool;
}
