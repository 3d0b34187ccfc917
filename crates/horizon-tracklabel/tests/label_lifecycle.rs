//! Lifecycle and placement behavior of the label controller against a
//! scripted viewport.

mod common;

use common::MockViewport;

use horizon_tracklabel::content::LabelContent;
use horizon_tracklabel::geometry::{Direction, GeoPoint, LabelSide, Point, Vector};
use horizon_tracklabel::viewport::{Layer, ViewportEvent};
use horizon_tracklabel::{AnchorKind, LabelOptions, TrackLabel};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Anchor projecting to screen (100, 50).
const ANCHOR: GeoPoint = GeoPoint::new(50.0, 100.0);

fn auto_label() -> TrackLabel {
    TrackLabel::new(
        LabelOptions::new().with_direction(Direction::Auto).shared(),
        AnchorKind::Marker,
    )
}

#[test]
fn test_attach_renders_and_places() {
    init_tracing();
    // Viewport center projects to (50, 50): anchor right of center.
    let viewport = MockViewport::new().with_center(GeoPoint::new(50.0, 50.0));
    let label = auto_label();
    label.set_content("hello"); // 5 chars -> 40 px wide
    label.set_position(ANCHOR);

    label.attach(viewport.clone());

    let container = label.container().expect("attach creates the container");
    assert!(label.is_attached());
    assert_eq!(viewport.layer_of(&container), Some(Layer::Markers));
    assert_eq!(container.markup(), Some(LabelContent::from("hello")));
    assert_eq!(container.width(), 40.0);
    assert_eq!(viewport.measure_calls(), 1);
    assert!(container.is_visible());

    // Auto with the anchor right of center places to the left:
    // (100 - 12 - 40, 50 - 15).
    assert_eq!(container.position(), Point::new(48.0, 35.0));
    assert_eq!(container.side(), Some(LabelSide::Left));
}

#[test]
fn test_auto_places_right_when_anchor_left_of_center() {
    let viewport = MockViewport::new().with_center(GeoPoint::new(50.0, 200.0));
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);

    label.attach(viewport);

    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(112.0, 35.0));
    assert_eq!(container.side(), Some(LabelSide::Right));
}

#[test]
fn test_fixed_right_direction() {
    let viewport = MockViewport::new().with_center(GeoPoint::new(50.0, 50.0));
    let label = TrackLabel::new(
        LabelOptions::new().with_direction(Direction::Right).shared(),
        AnchorKind::Marker,
    );
    label.set_content("hello");
    label.set_position(ANCHOR);

    label.attach(viewport);

    let container = label.container().unwrap();
    // anchor + offset, regardless of the center.
    assert_eq!(container.position(), Point::new(112.0, 35.0));
    assert_eq!(container.side(), Some(LabelSide::Right));
}

#[test]
fn test_path_labels_use_overlay_layer() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(LabelOptions::new().shared(), AnchorKind::Path);
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    let container = label.container().unwrap();
    assert_eq!(viewport.layer_of(&container), Some(Layer::Overlays));
}

#[test]
fn test_explicit_pane_overrides_layer() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(
        LabelOptions::new().with_pane("vessel-labels").shared(),
        AnchorKind::Marker,
    );
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    let container = label.container().unwrap();
    assert_eq!(
        viewport.layer_of(&container),
        Some(Layer::Named("vessel-labels".into()))
    );
}

#[test]
fn test_attach_to_same_viewport_twice_is_noop() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);

    label.attach(viewport.clone());
    let subscriptions = viewport.subscription_count();
    label.attach(viewport.clone());

    assert_eq!(viewport.subscription_count(), subscriptions);
    assert_eq!(viewport.measure_calls(), 1);
}

#[test]
fn test_attach_to_second_viewport_proceeds_and_leaks_old_subscriptions() {
    // Documented hazard: moving an attached label without detaching first
    // is not guarded. The label follows the new viewport; the old one keeps
    // the stale subscriptions.
    let first = MockViewport::new();
    let second = MockViewport::new();
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);

    label.attach(first.clone());
    let stale = first.subscription_count();
    label.attach(second.clone());

    assert!(label.is_attached());
    let container = label.container().unwrap();
    assert_eq!(second.layer_of(&container), Some(Layer::Markers));
    assert_eq!(first.subscription_count(), stale);

    // A clean detach only releases the current viewport.
    label.detach();
    assert_eq!(second.subscription_count(), 0);
    assert_eq!(first.subscription_count(), stale);
}

#[test]
fn test_deferred_opacity_and_z_index_apply_on_attach() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_opacity(0.5);
    label.set_z_index(7);
    label.set_position(ANCHOR);

    label.attach(viewport);

    let container = label.container().unwrap();
    assert_eq!(container.opacity(), 0.5);
    assert_eq!(container.z_index(), Some(7));
}

#[test]
fn test_property_setters_apply_immediately_while_attached() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_position(ANCHOR);
    label.attach(viewport);

    label.set_opacity(0.25);
    label.set_z_index(12);

    let container = label.container().unwrap();
    assert_eq!(container.opacity(), 0.25);
    assert_eq!(container.z_index(), Some(12));
}

#[test]
fn test_detach_retains_container_for_reuse() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());
    let container = label.container().unwrap();

    label.detach();

    assert!(!label.is_attached());
    assert!(!viewport.contains(&container));
    assert_eq!(viewport.subscription_count(), 0);
    // The container object survives, content intact.
    assert!(label.container().is_some());
    assert_eq!(container.markup(), Some(LabelContent::from("hello")));

    // Re-attach reuses it; unchanged content is not re-measured.
    label.attach(viewport.clone());
    assert!(viewport.contains(&container));
    assert_eq!(viewport.measure_calls(), 1);
}

#[test]
fn test_detach_twice_is_safe() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    label.detach();
    label.detach();

    assert_eq!(viewport.subscription_count(), 0);
    assert!(!label.is_attached());
}

#[test]
fn test_redundant_content_is_rendered_once() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    label.set_content("hello");
    assert_eq!(viewport.measure_calls(), 1);

    label.set_content("hello");
    assert_eq!(viewport.measure_calls(), 1); // cheap-equality skip

    label.set_content("hello!");
    assert_eq!(viewport.measure_calls(), 2);
    assert_eq!(label.container().unwrap().width(), 48.0);
}

#[test]
fn test_empty_content_is_never_rendered() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    label.set_content("");

    assert_eq!(viewport.measure_calls(), 0);
    assert_eq!(label.container().unwrap().markup(), None);
}

#[test]
fn test_set_position_updates_placement_immediately() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(
        LabelOptions::new().with_direction(Direction::Right).shared(),
        AnchorKind::Marker,
    );
    label.set_position(ANCHOR);
    label.attach(viewport);

    label.set_position(GeoPoint::new(80.0, 30.0)); // projects to (30, 80)

    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(42.0, 65.0));
}

#[test]
fn test_zoom_frames_reposition_every_frame() {
    let viewport = MockViewport::new().with_center(GeoPoint::new(50.0, 50.0));
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    // Frame 1: anchor projects to (200, 100); still right of center -> left.
    viewport.dispatch(ViewportEvent::ZoomFrame {
        zoom: 2.0,
        center: GeoPoint::new(50.0, 50.0),
    });
    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(148.0, 85.0));

    // Frame 2 immediately after: no coalescing, placement moves again.
    viewport.dispatch(ViewportEvent::ZoomFrame {
        zoom: 3.0,
        center: GeoPoint::new(50.0, 50.0),
    });
    assert_eq!(container.position(), Point::new(248.0, 135.0));
}

#[test]
fn test_move_end_skipped_for_animated_fixed_direction() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(
        LabelOptions::new().shared(), // direction Left, zoom_animation on
        AnchorKind::Marker,
    );
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    // Carry the label away with a zoom frame...
    viewport.dispatch(ViewportEvent::ZoomFrame {
        zoom: 2.0,
        center: GeoPoint::new(0.0, 0.0),
    });
    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(148.0, 85.0));

    // ...then settle: an animated, fixed-direction label stays where the
    // animation left it.
    viewport.dispatch(ViewportEvent::MoveEnd);
    assert_eq!(container.position(), Point::new(148.0, 85.0));
}

#[test]
fn test_move_end_repositions_auto_labels() {
    let viewport = MockViewport::new().with_center(GeoPoint::new(50.0, 200.0));
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    let container = label.container().unwrap();
    assert_eq!(container.side(), Some(LabelSide::Right));

    // Pan so the anchor ends up right of the new center; the side flips.
    viewport.set_center(GeoPoint::new(50.0, 50.0));
    viewport.dispatch(ViewportEvent::MoveEnd);

    assert_eq!(container.side(), Some(LabelSide::Left));
    assert_eq!(container.position(), Point::new(48.0, 35.0));
}

#[test]
fn test_move_end_repositions_non_animated_labels() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(
        LabelOptions::new().with_zoom_animation(false).shared(),
        AnchorKind::Marker,
    );
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    // No zoom subscription at all: frames are ignored...
    viewport.dispatch(ViewportEvent::ZoomFrame {
        zoom: 2.0,
        center: GeoPoint::new(0.0, 0.0),
    });
    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(48.0, 35.0));

    // ...and move-end recomputes against the panned projection.
    viewport.set_projection_offset(Vector::new(10.0, 5.0));
    viewport.dispatch(ViewportEvent::MoveEnd);
    assert_eq!(container.position(), Point::new(58.0, 40.0));
}

#[test]
fn test_view_reset_only_hard_resets_refresh() {
    let viewport = MockViewport::new();
    let label = TrackLabel::new(LabelOptions::new().shared(), AnchorKind::Marker);
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    viewport.dispatch(ViewportEvent::ZoomFrame {
        zoom: 2.0,
        center: GeoPoint::new(0.0, 0.0),
    });
    let container = label.container().unwrap();
    assert_eq!(container.position(), Point::new(148.0, 85.0));

    // Soft reset: ignored.
    viewport.dispatch(ViewportEvent::ViewReset { hard: false });
    assert_eq!(container.position(), Point::new(148.0, 85.0));

    // Hard reset: full refresh back to the settled projection.
    viewport.dispatch(ViewportEvent::ViewReset { hard: true });
    assert_eq!(container.position(), Point::new(48.0, 35.0));
    assert!(container.is_visible());
}

#[test]
fn test_tap_to_close_on_touch_viewport() {
    let viewport = MockViewport::new().with_touch(true);
    let label = TrackLabel::new(
        LabelOptions::new().with_no_hide(false).shared(),
        AnchorKind::Marker,
    );
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());
    let container = label.container().unwrap();

    viewport.dispatch(ViewportEvent::BackgroundTap {
        position: Point::new(300.0, 300.0),
    });

    assert!(!label.is_attached());
    assert!(!viewport.contains(&container));
    assert_eq!(viewport.subscription_count(), 0);
}

#[test]
fn test_no_hide_keeps_label_through_taps() {
    let viewport = MockViewport::new().with_touch(true);
    let label = TrackLabel::new(LabelOptions::new().shared(), AnchorKind::Marker);
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    viewport.dispatch(ViewportEvent::BackgroundTap {
        position: Point::new(300.0, 300.0),
    });

    assert!(label.is_attached());
}

#[test]
fn test_tap_to_close_not_armed_without_touch() {
    let viewport = MockViewport::new(); // not touch-capable
    let label = TrackLabel::new(
        LabelOptions::new().with_no_hide(false).shared(),
        AnchorKind::Marker,
    );
    label.set_position(ANCHOR);
    label.attach(viewport.clone());

    viewport.dispatch(ViewportEvent::BackgroundTap {
        position: Point::new(300.0, 300.0),
    });

    assert!(label.is_attached());
}

#[test]
fn test_close_detaches_and_is_idempotent() {
    let viewport = MockViewport::new();
    let label = auto_label();
    label.set_content("hello");
    label.set_position(ANCHOR);
    label.attach(viewport.clone());
    let container = label.container().unwrap();

    label.close();
    label.close();

    assert!(!label.is_attached());
    assert!(!viewport.contains(&container));
    assert_eq!(viewport.subscription_count(), 0);
}
