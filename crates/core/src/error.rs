//! Error types for the flow-field core.

use thiserror::Error;

/// Errors produced by flow-field operations.
///
/// Degenerate geometry inside the simulation (a pointer sitting exactly on a
/// particle, a zero-length velocity) is never an error: those cases are
/// handled as no-ops where they occur.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Width or height was zero, negative, non-finite, or overflowed when
    /// creating bounds or a surface.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// The host could not provide a drawing surface or a frame scheduler.
    #[error("missing host capability: {0}")]
    MissingHostCapability(String),

    /// Writing a snapshot or other host I/O failed.
    #[error("I/O error: {0}")]
    Io(String),
}
