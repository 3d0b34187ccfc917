//! Error types for the label engine.

use thiserror::Error;

/// Errors that can occur during label operations.
///
/// The taxonomy is deliberately narrow: everything on the hot viewport-event
/// path (redundant content, empty payloads, detach-while-detached) is
/// absorbed as a silent no-op, and only caller contract violations surface
/// as typed errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// An anchor-binding operation needed a bound label and none exists.
    #[error("anchor has no bound label")]
    NotBound,
}

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;
