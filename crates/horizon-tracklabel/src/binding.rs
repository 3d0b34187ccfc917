//! The anchor-side binding API.
//!
//! A [`LabelBinding`] is the capability an anchor type (a marker or path in
//! the host map library) embeds to carry a label. It is explicit
//! composition: the host constructs the binding as a field of its anchor
//! type, no shared base type is extended.
//!
//! ```ignore
//! struct VesselMarker {
//!     position: GeoPoint,
//!     label: LabelBinding,
//!     // ...
//! }
//!
//! impl VesselMarker {
//!     fn set_name(&mut self, name: &str) {
//!         // Visibility follows content: empty name hides the label.
//!         self.label.update_content(name);
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::content::LabelContent;
use crate::error::{LabelError, LabelResult};
use crate::geometry::GeoPoint;
use crate::label::{AnchorKind, TrackLabel};
use crate::options::LabelOptions;
use crate::viewport::Viewport;

/// Owns at most one [`TrackLabel`] on behalf of an anchor.
pub struct LabelBinding {
    anchor_kind: AnchorKind,
    viewport: Option<Arc<dyn Viewport>>,
    label: Option<TrackLabel>,
}

impl LabelBinding {
    /// Create an empty binding for an anchor of the given kind.
    pub fn new(anchor_kind: AnchorKind) -> Self {
        Self {
            anchor_kind,
            viewport: None,
            label: None,
        }
    }

    /// The bound label, if any.
    pub fn label(&self) -> Option<&TrackLabel> {
        self.label.as_ref()
    }

    /// Record the viewport the anchor currently sits on. Used by
    /// [`update_content`](Self::update_content) to attach on demand.
    pub fn set_viewport(&mut self, viewport: Arc<dyn Viewport>) {
        self.viewport = Some(viewport);
    }

    /// Forget the anchor's viewport. Does not detach an attached label;
    /// hosts close or unbind when the anchor leaves the map.
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }

    /// Bind a label with the given content and options.
    ///
    /// Binding again with the *same* options object (`Arc` identity, not
    /// value equality) reuses the existing label and only updates its
    /// content. A different options object constructs a fresh label; the
    /// replaced one is closed first so its container never lingers in the
    /// viewport's render tree.
    pub fn bind(
        &mut self,
        content: impl Into<LabelContent>,
        options: &Arc<LabelOptions>,
    ) -> &TrackLabel {
        let reusable = self
            .label
            .as_ref()
            .is_some_and(|label| Arc::ptr_eq(label.options(), options));
        if !reusable {
            if let Some(previous) = self.label.take() {
                previous.close();
            }
            tracing::debug!(target: "horizon_tracklabel::binding", kind = ?self.anchor_kind, "bound new label");
        }
        let anchor_kind = self.anchor_kind;
        let label = self
            .label
            .get_or_insert_with(|| TrackLabel::new(options.clone(), anchor_kind));
        label.set_content(content);
        label
    }

    /// Close the bound label and drop it. No-op when nothing is bound.
    pub fn unbind(&mut self) {
        if let Some(label) = self.label.take() {
            label.close();
            tracing::debug!(target: "horizon_tracklabel::binding", "label unbound");
        }
    }

    /// Update the label's content, coupling visibility to content presence:
    /// non-empty markup attaches the label on demand (via the recorded
    /// viewport) and sets the content; empty markup closes the label.
    /// No-op when nothing is bound.
    pub fn update_content(&self, markup: &str) {
        let Some(label) = &self.label else { return };
        if markup.is_empty() {
            if label.is_attached() {
                label.close();
            }
            return;
        }
        if !label.is_attached()
            && let Some(viewport) = &self.viewport
        {
            label.attach(viewport.clone());
        }
        label.set_content(markup);
    }

    /// Move the label to a new geographic position.
    ///
    /// Callers are expected to bind before updating; forwarding without a
    /// bound label is a contract violation and returns
    /// [`LabelError::NotBound`].
    pub fn update_position(&self, position: GeoPoint) -> LabelResult<()> {
        let label = self.label.as_ref().ok_or(LabelError::NotBound)?;
        label.set_position(position);
        Ok(())
    }
}
