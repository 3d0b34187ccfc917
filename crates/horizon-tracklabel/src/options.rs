//! Label configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Vector};

/// Options controlling a label's appearance and behavior.
///
/// Options are immutable once a label has been constructed from them; the
/// anchor binding compares the options *object* (not its contents) to decide
/// whether a re-bind can reuse the existing label, so they are passed around
/// as [`Arc<LabelOptions>`].
///
/// All fields have serde defaults, so hosts can load partial label settings
/// from configuration files:
///
/// ```
/// use horizon_tracklabel::options::LabelOptions;
///
/// let options: LabelOptions =
///     serde_json::from_str(r#"{ "direction": "auto", "clickable": true }"#).unwrap();
/// assert!(options.clickable);
/// assert!(options.no_hide); // untouched fields keep their defaults
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    /// Extra visual tag applied to the container, for host styling.
    pub class_name: String,

    /// Whether the label forwards pointer events to its listeners.
    pub clickable: bool,

    /// Side preference for placement.
    pub direction: Direction,

    /// Keep the label visible on touch viewports. When `false` and the
    /// viewport is touch-capable, a tap on the label or the viewport
    /// background closes the label.
    pub no_hide: bool,

    /// Offset from the anchor's projected point to the label.
    pub offset: Vector,

    /// Container opacity, 0–1.
    pub opacity: f32,

    /// Follow continuous zoom animation frame-by-frame. When `false` the
    /// label only repositions on move-end.
    pub zoom_animation: bool,

    /// Explicit render layer override. When unset, the layer is chosen from
    /// the anchor kind.
    pub pane: Option<String>,
}

impl LabelOptions {
    /// Default anchor offset: 6px pointer triangle + 6px padding.
    pub const DEFAULT_OFFSET: Vector = Vector::new(12.0, -15.0);

    /// Create options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extra visual tag using builder pattern.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set clickability using builder pattern.
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// Set the side preference using builder pattern.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set touch persistence using builder pattern.
    pub fn with_no_hide(mut self, no_hide: bool) -> Self {
        self.no_hide = no_hide;
        self
    }

    /// Set the anchor offset using builder pattern.
    pub fn with_offset(mut self, offset: Vector) -> Self {
        self.offset = offset;
        self
    }

    /// Set the opacity using builder pattern.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set zoom-animation following using builder pattern.
    pub fn with_zoom_animation(mut self, zoom_animation: bool) -> Self {
        self.zoom_animation = zoom_animation;
        self
    }

    /// Set an explicit render layer using builder pattern.
    pub fn with_pane(mut self, pane: impl Into<String>) -> Self {
        self.pane = Some(pane.into());
        self
    }

    /// Wrap in an [`Arc`] for binding to an anchor.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            clickable: false,
            direction: Direction::Left,
            no_hide: true,
            offset: Self::DEFAULT_OFFSET,
            opacity: 1.0,
            zoom_animation: true,
            pane: None,
        }
    }
}
