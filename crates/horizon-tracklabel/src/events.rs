//! Pointer events and the label's event relay.
//!
//! A label with `clickable` configured forwards pointer and gesture events
//! that hit its container to observers registered on [`LabelEvents`]. The
//! relay is decoupled from the viewport's own event system: hosts deliver
//! container hits to [`TrackLabel::dispatch_pointer`] and apply the returned
//! [`EventDisposition`] to their platform event.
//!
//! [`TrackLabel::dispatch_pointer`]: crate::label::TrackLabel::dispatch_pointer

use horizon_tracklabel_core::Signal;

use crate::geometry::Point;

/// Keyboard modifiers that may be held during pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// The pointer/gesture kinds the relay forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Primary button click (or tap).
    PrimaryClick,
    /// Primary button double click.
    DoubleClick,
    /// Button or touch press began.
    PressStart,
    /// Pointer entered the container.
    HoverEnter,
    /// Pointer left the container.
    HoverLeave,
    /// Context menu gesture (secondary click, long press).
    ContextMenu,
}

/// A pointer event delivered to a label's container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Screen position of the pointer.
    pub position: Point,
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create an event with no modifiers held.
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// What the host should suppress after a forwarded event.
///
/// `stop_propagation` keeps the event from reaching the map surface under
/// the label (so a click on a label does not also pan the map);
/// `prevent_default` suppresses the platform's default reaction (text
/// selection on press, the native context menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventDisposition {
    pub stop_propagation: bool,
    pub prevent_default: bool,
}

impl EventDisposition {
    /// Let the event through untouched.
    pub const NONE: Self = Self {
        stop_propagation: false,
        prevent_default: false,
    };
}

/// The observer surface of a label.
///
/// One signal per forwarded pointer kind, emitted with the originating
/// [`PointerEvent`]. Connect and disconnect freely; whether anyone listens
/// also feeds back into event suppression (see [`LabelEvents::relay`]).
#[derive(Default)]
pub struct LabelEvents {
    /// Primary click on the container.
    pub clicked: Signal<PointerEvent>,
    /// Double click on the container.
    pub double_clicked: Signal<PointerEvent>,
    /// Press began on the container.
    pub press_started: Signal<PointerEvent>,
    /// Pointer entered the container.
    pub hover_entered: Signal<PointerEvent>,
    /// Pointer left the container.
    pub hover_left: Signal<PointerEvent>,
    /// Context menu gesture on the container.
    pub context_menu: Signal<PointerEvent>,
}

impl LabelEvents {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forward one event and compute what the host should suppress.
    ///
    /// Suppression policy:
    /// - a primary click stops propagation only when someone listens for it,
    ///   so an unobserved label never swallows map clicks;
    /// - a press-start always prevents the platform default (text selection
    ///   and drag artifacts) but propagates;
    /// - a context menu always stops propagation and suppresses the native
    ///   menu only when someone listens;
    /// - everything else stops propagation.
    pub(crate) fn relay(&self, event: PointerEvent) -> EventDisposition {
        match event.kind {
            PointerEventKind::PrimaryClick => {
                let stop = self.clicked.has_connections();
                self.clicked.emit(event);
                EventDisposition {
                    stop_propagation: stop,
                    prevent_default: false,
                }
            }
            PointerEventKind::DoubleClick => {
                self.double_clicked.emit(event);
                EventDisposition {
                    stop_propagation: true,
                    prevent_default: false,
                }
            }
            PointerEventKind::PressStart => {
                self.press_started.emit(event);
                EventDisposition {
                    stop_propagation: false,
                    prevent_default: true,
                }
            }
            PointerEventKind::HoverEnter => {
                self.hover_entered.emit(event);
                EventDisposition {
                    stop_propagation: true,
                    prevent_default: false,
                }
            }
            PointerEventKind::HoverLeave => {
                self.hover_left.emit(event);
                EventDisposition {
                    stop_propagation: true,
                    prevent_default: false,
                }
            }
            PointerEventKind::ContextMenu => {
                let prevent = self.context_menu.has_connections();
                self.context_menu.emit(event);
                EventDisposition {
                    stop_propagation: true,
                    prevent_default: prevent,
                }
            }
        }
    }
}
