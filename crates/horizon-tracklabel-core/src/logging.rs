//! Logging facilities for Horizon TrackLabel.
//!
//! The engine is instrumented with the `tracing` crate. To see logs, install
//! a tracing subscriber in the host application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_tracklabel_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_tracklabel_core::signal";
    /// Label controller lifecycle target.
    pub const LABEL: &str = "horizon_tracklabel::label";
    /// Event relay target.
    pub const EVENTS: &str = "horizon_tracklabel::events";
    /// Anchor binding target.
    pub const BINDING: &str = "horizon_tracklabel::binding";
}
