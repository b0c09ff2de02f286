//! Error types for the sketchbook core.

use thiserror::Error;

/// Errors produced by sketch operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SketchError {
    /// A parameter merge was rejected. The store is left unchanged.
    #[error("invalid parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    /// A bounded collection holds more entities than its capacity.
    ///
    /// This is an internal invariant failure, not a user error.
    #[error("capacity violation: {len} entities in a collection of capacity {capacity}")]
    CapacityViolation { len: usize, capacity: usize },

    /// Width or height was zero when creating a viewport.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// No sketch is registered under this name.
    #[error("unknown sketch: {0}")]
    UnknownSketch(String),

    /// Writing frames or reading configuration failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl SketchError {
    /// Shorthand for an [`SketchError::InvalidParameter`].
    pub fn invalid_param(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SketchError::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
