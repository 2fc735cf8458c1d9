//! Error types for layerplot operations.

use std::io;
use thiserror::Error;

use crate::grammar::AesName;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in layerplot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid dimensions for a plot surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A geom was rendered without one of its required aesthetics.
    #[error("{geom} geom requires the '{aesthetic}' aesthetic")]
    MissingAesthetic {
        /// Geom name.
        geom: &'static str,
        /// The aesthetic that could not be resolved.
        aesthetic: AesName,
    },

    /// None of `y`, `yLeft` or `yRight` is bound.
    #[error("{geom} geom requires one of the 'y', 'yLeft' or 'yRight' aesthetics")]
    MissingVerticalAesthetic {
        /// Geom name.
        geom: &'static str,
    },

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
