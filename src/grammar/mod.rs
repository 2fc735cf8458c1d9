//! Grammar of Graphics implementation.
//!
//! A [`Plot`] owns default data, default aesthetics, scale configuration and
//! an ordered list of [`Layer`]s. Each layer pairs one [`Geom`] with its own
//! aesthetic overrides and, optionally, its own data.
//!
//! # Components
//!
//! - **Aesthetics**: bindings from a row (or group of rows) to visual properties
//! - **Geometries**: point, path, error bar and text drawing strategies
//! - **Scales**: trained once per render, shared by every layer
//! - **Theme**: the non-data appearance of the chart
//!
//! # Example
//!
//! ```rust
//! use layerplot::grammar::*;
//! use layerplot::render::DrawList;
//!
//! let data = vec![
//!     Row::new().with("x", 1.0).with("y", 2.0),
//!     Row::new().with("x", 2.0).with("y", 4.0),
//! ];
//!
//! let plot = Plot::new()
//!     .data(data)
//!     .aes(Aes::new().x("x").y("y"))
//!     .layer(Layer::new(PointGeom::new()));
//!
//! let mut canvas = DrawList::new();
//! let report = plot.render(&mut canvas).unwrap();
//! assert!(report.is_complete());
//! assert_eq!(canvas.marker_count(), 2);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod chrome;
mod data;
mod geom;
mod layer;
mod plot;
mod resolve;
mod theme;
mod train;

pub use aes::{Aes, AesName, Aesthetic, GroupFn, RowFn};
pub use data::{DataValue, Row};
pub use geom::{
    error_extent, ErrorBarGeom, Geom, LayerContext, PathGeom, PointGeom, PointShape, Position,
    TextGeom,
};
pub use layer::Layer;
pub use plot::{LayerReport, LayerStatus, Labels, Plot, RenderReport};
pub use resolve::{Resolver, Side, XyAes};
pub use theme::{Margins, Theme};
pub use train::{ColorMapping, ScaleTrainer, TrainedScales};
