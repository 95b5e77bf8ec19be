//! Error types.
//!
//! Navigation itself never fails: out-of-range indices are clamped or
//! ignored. Errors are reserved for invalid input that cannot be
//! interpreted at all.

use thiserror::Error;

/// Errors reported by `zencanvas`.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Rotation angle is not a multiple of 90 degrees.
    #[error("unsupported rotation: {degrees} degrees is not a multiple of 90")]
    UnsupportedRotation { degrees: i32 },

    /// The rendering backend cannot rotate tiled images.
    #[error("rotation is not supported by the rendering backend")]
    RotationNotSupported,

    /// A configuration value is out of its valid domain.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// Checked canvas-group lookup past the end of the registry.
    #[error("canvas group {index} out of range (count {count})")]
    CanvasGroupOutOfRange { index: usize, count: usize },
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
