//! # layerplot
//!
//! Declarative, layered charting core built on the Grammar of Graphics.
//!
//! A [`grammar::Plot`] owns default data, default aesthetics, scale
//! configuration and an ordered list of layers. Each layer pairs a geom
//! (point, path, error bar or text) with aesthetic overrides and optional
//! private data. Rendering trains shared scales from every layer, then draws
//! each layer through a [`render::Canvas`], such as the recording
//! [`render::DrawList`] or the [`output::SvgEncoder`].
//!
//! ## Quick Start
//!
//! ```rust
//! use layerplot::prelude::*;
//!
//! let data = vec![
//!     Row::new().with("x", 0.0).with("g", "a").with("y", 1.0),
//!     Row::new().with("x", 1.0).with("g", "a").with("y", 2.0),
//!     Row::new().with("x", 0.0).with("g", "b").with("y", 5.0),
//!     Row::new().with("x", 1.0).with("g", "b").with("y", 6.0),
//! ];
//!
//! let plot = Plot::new()
//!     .dimensions(400, 300)
//!     .title("Groups")
//!     .data(data)
//!     .aes(Aes::new().x("x").y("y").color("g"))
//!     .layer(Layer::new(PathGeom::new()).aes(Aes::new().group("g")))
//!     .layer(Layer::new(PointGeom::new()));
//!
//! let svg = plot.to_svg().unwrap();
//! assert!(svg.contains("<polyline"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for scale specs, labels and aesthetic names
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Geometric primitives (points, extents).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Grammar of Graphics implementation.
pub mod grammar;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surfaces and draw commands.
pub mod render;

/// Output encoders (SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for layerplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use layerplot::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Point;
    pub use crate::grammar::{
        Aes, AesName, Aesthetic, DataValue, ErrorBarGeom, Geom, Labels, Layer, PathGeom, Plot,
        PointGeom, PointShape, Position, RenderReport, Row, TextGeom, Theme,
    };
    pub use crate::output::SvgEncoder;
    pub use crate::render::{Canvas, DrawList, Primitive};
    pub use crate::scale::{ScaleSpec, ScaleSpecs, ScaleType, Trans};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
