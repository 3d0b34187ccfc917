//! Signal/slot system for Horizon TrackLabel.
//!
//! This module provides a type-safe signal/slot mechanism for observing label
//! state. Signals are emitted by label controllers when something happens
//! (a pointer event, a lifecycle change), and connected slots (callbacks)
//! are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//!
//! # Dispatch Model
//!
//! All dispatch is direct and synchronous: `emit` invokes every connected
//! slot on the calling thread, in connection order, before returning. There
//! is no queuing and no cross-thread hand-off: the label engine operates
//! inside a single cooperative event-dispatch thread, and slots are expected
//! to be cheap.
//!
//! A slot that panics is contained: the panic is caught, reported through
//! `tracing`, and the remaining slots still run. A misbehaving listener on
//! one label must not abort updates to sibling labels dispatched in the same
//! viewport notification cycle.
//!
//! # Example
//!
//! ```
//! use horizon_tracklabel_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped so emission can run it
    /// without holding the connection lock).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided argument, in the order they were connected.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments.
///
/// # Panic Containment
///
/// A panicking slot does not poison the signal and does not prevent the
/// slots connected after it from running. The panic is reported at error
/// level under the `horizon_tracklabel_core::signal` target.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_tracklabel_core::Signal;
    ///
    /// let signal = Signal::<i32>::new();
    /// let id = signal.connect(|n| println!("Got: {}", n));
    /// signal.emit(7);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Check whether any slot is connected.
    ///
    /// Event relays use this to decide whether a forwarded event should
    /// suppress propagation to the underlying surface: nobody listening
    /// means nothing to suppress.
    pub fn has_connections(&self) -> bool {
        !self.connections.lock().is_empty()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Otherwise every connected
    /// slot is invoked directly, in connection order, with a reference to
    /// `args`. A panicking slot is caught and reported; the remaining slots
    /// still run.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "horizon_tracklabel_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so emission runs without the connection lock
        // held. A slot may connect or disconnect on this same signal.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.iter().map(|(_, conn)| conn.slot.clone()).collect()
        };
        tracing::trace!(target: "horizon_tracklabel_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            if panic::catch_unwind(AssertUnwindSafe(|| slot(&args))).is_err() {
                tracing::error!(
                    target: "horizon_tracklabel_core::signal",
                    "connected slot panicked during emit; continuing with remaining slots"
                );
            }
        }
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
