//! SDK error types.

use thiserror::Error;

/// Errors surfaced synchronously to the host application.
///
/// Everything past a builder's preconditions (serialization, transport) is
/// best-effort and never reaches the caller; only precondition and
/// construction failures appear here.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed identity configuration (mandatory-field violation).
    #[error("invalid identity: {0}")]
    Validation(String),
    /// A required argument was missing or rejected (empty API key, unknown
    /// event type for a checked category, missing category/type).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An operation was attempted before the SDK was initialized.
    #[error("GamePulse must be initialized first. Call GamePulse::init(..).create()")]
    NotInitialized,
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
