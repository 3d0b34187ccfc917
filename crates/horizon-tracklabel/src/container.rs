//! The label's visual surface.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::content::LabelContent;
use crate::geometry::{LabelSide, Point};

/// Shared handle to a [`Container`].
///
/// The label controller owns the container exclusively and is the only
/// writer; the viewport holds the handle while the container sits in one of
/// its render layers.
pub type ContainerHandle = Arc<Container>;

/// State of a label's container, written by the render and placement passes
/// and read back by the host when painting.
#[derive(Debug, Clone, Default)]
struct ContainerState {
    markup: Option<LabelContent>,
    width: f32,
    position: Point,
    side: Option<LabelSide>,
    visible: bool,
    opacity: f32,
    z_index: Option<i32>,
    interactive: bool,
}

/// The visual surface of a label.
///
/// A container is created lazily on the label's first attachment and reused
/// across re-attachments: removal detaches it from the viewport's render
/// tree but keeps the object (and its content) alive. A label therefore has
/// a container if and only if it has ever been attached.
#[derive(Debug)]
pub struct Container {
    /// Extra visual tag from the label options, fixed at creation.
    class_name: String,
    state: Mutex<ContainerState>,
}

impl Container {
    pub(crate) fn new(class_name: String, opacity: f32, z_index: Option<i32>) -> ContainerHandle {
        Arc::new(Self {
            class_name,
            state: Mutex::new(ContainerState {
                opacity,
                z_index,
                visible: true,
                ..ContainerState::default()
            }),
        })
    }

    /// The extra visual tag configured for this label.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The markup currently written into the container, if any.
    pub fn markup(&self) -> Option<LabelContent> {
        self.state.lock().markup.clone()
    }

    /// The laid-out width as of the last render.
    pub fn width(&self) -> f32 {
        self.state.lock().width
    }

    /// The screen position of the container's placement corner.
    pub fn position(&self) -> Point {
        self.state.lock().position
    }

    /// Which side of the anchor the container sits on. Exactly one side is
    /// set whenever the label has been placed; never both.
    pub fn side(&self) -> Option<LabelSide> {
        self.state.lock().side
    }

    /// Whether the container is currently shown. Full refreshes briefly hide
    /// the container so a half-updated label is never visible.
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    /// Container opacity, 0–1.
    pub fn opacity(&self) -> f32 {
        self.state.lock().opacity
    }

    /// Stacking order within the render layer, if set.
    pub fn z_index(&self) -> Option<i32> {
        self.state.lock().z_index
    }

    /// Whether the container is tagged as interactive (pointer events on it
    /// are routed to the label's event relay).
    pub fn is_interactive(&self) -> bool {
        self.state.lock().interactive
    }

    pub(crate) fn set_markup(&self, markup: LabelContent, width: f32) {
        let mut state = self.state.lock();
        state.markup = Some(markup);
        state.width = width;
    }

    pub(crate) fn place(&self, position: Point, side: LabelSide) {
        let mut state = self.state.lock();
        state.position = position;
        state.side = Some(side);
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    pub(crate) fn set_opacity(&self, opacity: f32) {
        self.state.lock().opacity = opacity;
    }

    pub(crate) fn set_z_index(&self, z_index: i32) {
        self.state.lock().z_index = Some(z_index);
    }

    pub(crate) fn set_interactive(&self, interactive: bool) {
        self.state.lock().interactive = interactive;
    }
}
