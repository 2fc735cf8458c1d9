//! Text geom: the `label` aesthetic drawn at each row's position.

use tracing::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::aes::{Aes, AesName};
use crate::grammar::resolve::{require, Resolver, XyAes};
use crate::grammar::train::TrainedScales;
use crate::render::{Canvas, Primitive, TextAnchor};

use super::{Geom, LayerContext};

/// Label per row at `(x, -y)`, shifted by a fixed pixel offset.
#[derive(Debug, Clone)]
pub struct TextGeom {
    size: f32,
    color: Rgba,
    anchor: TextAnchor,
    offset: (f32, f32),
}

impl Default for TextGeom {
    fn default() -> Self {
        Self {
            size: 11.0,
            color: Rgba::BLACK,
            anchor: TextAnchor::Middle,
            offset: (0.0, 0.0),
        }
    }
}

impl TextGeom {
    /// Centered black labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Font size.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Text color when `color` is unbound.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Horizontal alignment.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Offset in pixels; positive `dy` moves the label up.
    #[must_use]
    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = (dx, dy);
        self
    }
}

impl Geom for TextGeom {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn init_aesthetics(&self, aes: &Aes) -> Result<XyAes> {
        let xy = XyAes::resolve(self.name(), aes)?;
        require(self.name(), aes, AesName::Label)?;
        Ok(xy)
    }

    fn render(
        &self,
        layer: &LayerContext<'_>,
        scales: &TrainedScales,
        canvas: &mut dyn Canvas,
    ) -> Result<usize> {
        let xy = self.init_aesthetics(layer.aes)?;
        let resolver = Resolver::new(layer, scales, &xy);
        let (dx, dy) = self.offset;

        let mut drawn = 0;
        for row in layer.data {
            let Some((x, y)) = resolver.position(row) else { continue };
            let Some(text) = resolver.text(row, AesName::Label) else { continue };

            canvas.draw(Primitive::Text {
                at: Point::chart(x + dx, y + dy),
                text,
                size: self.size,
                fill: resolver.color(row, self.color),
                anchor: self.anchor,
                rotate: 0.0,
            });
            drawn += 1;
        }

        debug!(geom = self.name(), rows = layer.data.len(), drawn, "rendered labels");
        Ok(drawn)
    }
}
