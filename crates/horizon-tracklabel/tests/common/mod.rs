//! Shared test double for the viewport contract.

// Each integration test binary uses a different subset of the helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use horizon_tracklabel::content::LabelContent;
use horizon_tracklabel::geometry::{GeoPoint, Point, Size, Vector};
use horizon_tracklabel::viewport::{
    Layer, SubscriptionId, Viewport, ViewportEvent, ViewportEventKind, ViewportHandler,
};
use horizon_tracklabel::ContainerHandle;

/// Width of one rendered character in the mock's layout.
pub const CHAR_WIDTH: f32 = 8.0;

struct MockState {
    next_subscription: u64,
    handlers: HashMap<u64, (ViewportEventKind, ViewportHandler)>,
    layers: Vec<(Layer, ContainerHandle)>,
    measure_calls: usize,
    center: GeoPoint,
    /// Added to every projection, so tests can simulate a pan shifting the
    /// geographic-to-screen mapping.
    projection_offset: Vector,
    touch_capable: bool,
    zoom_animated: bool,
}

/// A scriptable viewport: linear projection (`lng` → x, `lat` → y),
/// character-count text measurement, recorded subscriptions and layers.
pub struct MockViewport {
    state: Mutex<MockState>,
}

impl MockViewport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                next_subscription: 0,
                handlers: HashMap::new(),
                layers: Vec::new(),
                measure_calls: 0,
                center: GeoPoint::new(0.0, 0.0),
                projection_offset: Vector::ZERO,
                touch_capable: false,
                zoom_animated: true,
            }),
        })
    }

    pub fn with_center(self: Arc<Self>, center: GeoPoint) -> Arc<Self> {
        self.state.lock().center = center;
        self
    }

    pub fn with_touch(self: Arc<Self>, touch_capable: bool) -> Arc<Self> {
        self.state.lock().touch_capable = touch_capable;
        self
    }

    pub fn with_zoom_animation(self: Arc<Self>, zoom_animated: bool) -> Arc<Self> {
        self.state.lock().zoom_animated = zoom_animated;
        self
    }

    pub fn set_center(&self, center: GeoPoint) {
        self.state.lock().center = center;
    }

    /// Shift the projection, as a pan would.
    pub fn set_projection_offset(&self, offset: Vector) {
        self.state.lock().projection_offset = offset;
    }

    /// Deliver an event to every handler subscribed for its kind.
    ///
    /// Handlers are snapshotted before invocation, per the `Viewport`
    /// re-entrancy contract: a handler may unsubscribe on this call stack.
    pub fn dispatch(&self, event: ViewportEvent) {
        let handlers: Vec<ViewportHandler> = {
            let state = self.state.lock();
            state
                .handlers
                .values()
                .filter(|(kind, _)| *kind == event.kind())
                .map(|(_, handler)| handler.clone())
                .collect()
        };
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.state.lock().handlers.len()
    }

    pub fn measure_calls(&self) -> usize {
        self.state.lock().measure_calls
    }

    /// The layer a container currently sits in, if inserted.
    pub fn layer_of(&self, container: &ContainerHandle) -> Option<Layer> {
        self.state
            .lock()
            .layers
            .iter()
            .find(|(_, inserted)| Arc::ptr_eq(inserted, container))
            .map(|(layer, _)| layer.clone())
    }

    pub fn contains(&self, container: &ContainerHandle) -> bool {
        self.layer_of(container).is_some()
    }
}

impl Viewport for MockViewport {
    fn project(&self, position: GeoPoint) -> Point {
        let offset = self.state.lock().projection_offset;
        Point::new(position.lng as f32, position.lat as f32).translate(offset)
    }

    fn project_during_zoom(&self, position: GeoPoint, zoom: f64, _center: GeoPoint) -> Point {
        Point::new(
            (position.lng * zoom) as f32,
            (position.lat * zoom) as f32,
        )
    }

    fn center(&self) -> GeoPoint {
        self.state.lock().center
    }

    fn subscribe(&self, kind: ViewportEventKind, handler: ViewportHandler) -> SubscriptionId {
        let mut state = self.state.lock();
        let id = state.next_subscription;
        state.next_subscription += 1;
        state.handlers.insert(id, (kind, handler));
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.lock().handlers.remove(&id.0).is_some()
    }

    fn insert_into_layer(&self, layer: &Layer, container: &ContainerHandle) {
        let mut state = self.state.lock();
        state
            .layers
            .retain(|(_, inserted)| !Arc::ptr_eq(inserted, container));
        state.layers.push((layer.clone(), container.clone()));
    }

    fn remove_from_layer(&self, container: &ContainerHandle) {
        self.state
            .lock()
            .layers
            .retain(|(_, inserted)| !Arc::ptr_eq(inserted, container));
    }

    fn measure(&self, content: &LabelContent) -> Size {
        let mut state = self.state.lock();
        state.measure_calls += 1;
        let chars = content.as_markup().map_or(0, |markup| markup.chars().count());
        Size::new(chars as f32 * CHAR_WIDTH, 14.0)
    }

    fn is_touch_capable(&self) -> bool {
        self.state.lock().touch_capable
    }

    fn supports_zoom_animation(&self) -> bool {
        self.state.lock().zoom_animated
    }
}
