//! Geometry types for Grammar of Graphics.
//!
//! A geom is the drawing strategy of a layer. Every geom resolves `x` and a
//! vertical aesthetic through [`XyAes`], reports its domain values during
//! training and then draws through a [`Canvas`] at `(x, -y)`: chart y grows
//! upward while surface y grows downward.

mod errorbar;
mod path;
mod point;
mod text;

pub use errorbar::{error_extent, ErrorBarGeom};
pub use path::PathGeom;
pub use point::{PointGeom, Position};
pub use text::TextGeom;

use std::fmt;

use crate::error::Result;
use crate::render::Canvas;

use super::aes::Aes;
use super::data::Row;
use super::resolve::XyAes;
use super::train::{ScaleTrainer, TrainedScales};

/// Shape types for point geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Filled square.
    Square,
    /// Filled triangle.
    Triangle,
    /// Diamond shape.
    Diamond,
    /// Cross (+).
    Cross,
    /// X shape.
    X,
}

impl PointShape {
    /// Every shape, in the order a shape scale assigns them.
    pub const ALL: [PointShape; 6] = [
        PointShape::Circle,
        PointShape::Triangle,
        PointShape::Square,
        PointShape::Diamond,
        PointShape::Cross,
        PointShape::X,
    ];
}

/// What a geom sees of its layer: rows, merged aesthetics and series name.
#[derive(Debug, Clone, Copy)]
pub struct LayerContext<'a> {
    /// Rows to draw (layer data, or the plot's default data).
    pub data: &'a [Row],
    /// Plot aesthetics merged with the layer's overrides.
    pub aes: &'a Aes,
    /// Layer name, used to qualify discrete scale keys.
    pub series: Option<&'a str>,
}

/// A drawing strategy for one layer.
pub trait Geom: fmt::Debug + Send + Sync {
    /// Geom name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Resolve the bindings this geom requires.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first required aesthetic that is unbound.
    fn init_aesthetics(&self, aes: &Aes) -> Result<XyAes> {
        XyAes::resolve(self.name(), aes)
    }

    /// Report the domain values this layer will draw.
    ///
    /// # Errors
    ///
    /// Returns an error if a required aesthetic is unbound.
    fn train(&self, layer: &LayerContext<'_>, trainer: &mut ScaleTrainer) -> Result<()> {
        let xy = self.init_aesthetics(layer.aes)?;
        trainer.observe_rows(layer, &xy);
        Ok(())
    }

    /// Draw the layer; returns the number of primitives emitted.
    ///
    /// Nothing is drawn when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a required aesthetic is unbound.
    fn render(
        &self,
        layer: &LayerContext<'_>,
        scales: &TrainedScales,
        canvas: &mut dyn Canvas,
    ) -> Result<usize>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::scale::ScaleSpecs;

    /// Train `geom` alone on `layer` with the given scale specs.
    pub fn train_one(
        geom: &dyn Geom,
        layer: &LayerContext<'_>,
        specs: &ScaleSpecs,
        grid: (f32, f32),
    ) -> TrainedScales {
        let mut trainer = ScaleTrainer::new();
        geom.train(layer, &mut trainer).unwrap();
        trainer.finish(specs, grid.0, grid.1).unwrap()
    }
}
