//! Anchor-tracking labels for interactive 2-D map viewports.
//!
//! A [`TrackLabel`] is an auxiliary annotation that follows a movable anchor
//! (a marker or a path) across pans, zooms and resets of a host map surface,
//! and picks which side of the anchor to render on: either fixed or
//! automatically, pointing away from the viewport's visual center so labels
//! near an edge do not clip.
//!
//! The host map library stays in charge of projection, render layers and
//! input; it participates through the [`Viewport`] trait. Anchors carry
//! labels through a [`LabelBinding`] field, as explicit composition; nothing
//! is grafted onto the host's types.
//!
//! # Overview
//!
//! - [`TrackLabel`]: the label controller (lifecycle, content, placement)
//! - [`LabelBinding`]: the anchor-side API (`bind`, `unbind`,
//!   `update_content`, `update_position`)
//! - [`LabelOptions`]: configuration (direction, offset, opacity, ...)
//! - [`Viewport`]: the host surface contract (consumed, not implemented)
//! - [`geometry::compute_placement`]: the pure side-selection rule
//!
//! # Example
//!
//! ```ignore
//! use horizon_tracklabel::{AnchorKind, LabelBinding, LabelOptions};
//! use horizon_tracklabel::geometry::{Direction, GeoPoint};
//!
//! // A marker embeds a binding; the host wires the viewport when the
//! // marker is added to the map.
//! let mut binding = LabelBinding::new(AnchorKind::Marker);
//! binding.set_viewport(viewport);
//!
//! let options = LabelOptions::new()
//!     .with_direction(Direction::Auto)
//!     .with_clickable(true)
//!     .shared();
//!
//! // Non-empty content shows the label, empty content hides it.
//! binding.bind("MV Aurora", &options);
//! binding.update_content("MV Aurora — 12.4 kn");
//! binding.update_position(GeoPoint::new(53.54, 8.58))?;
//! ```

pub mod binding;
pub mod container;
pub mod content;
pub mod error;
pub mod events;
pub mod geometry;
pub mod label;
pub mod options;
pub mod viewport;

pub use binding::LabelBinding;
pub use container::{Container, ContainerHandle};
pub use content::LabelContent;
pub use error::{LabelError, LabelResult};
pub use events::{
    EventDisposition, KeyboardModifiers, LabelEvents, PointerEvent, PointerEventKind,
};
pub use label::{AnchorKind, TrackLabel};
pub use options::LabelOptions;
pub use viewport::{
    Layer, SubscriptionId, Viewport, ViewportEvent, ViewportEventKind, ViewportHandler,
};
