//! Core systems for Horizon TrackLabel.
//!
//! This crate provides the foundational pieces shared by the label engine:
//!
//! - **Signal/Slot System**: Type-safe observer registration for label events
//! - **Logging Targets**: `tracing` target constants for per-subsystem filtering
//!
//! Label controllers expose their pointer events as [`Signal`]s so hosts can
//! observe a label without coupling to the viewport's own event machinery.
//! Dispatch is single-threaded and cooperative: every connected slot runs
//! synchronously, in connection order, on the thread that emits.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tracklabel_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionId, Signal};
