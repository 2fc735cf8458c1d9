//! Aesthetic resolution shared by every geom.
//!
//! [`XyAes`] checks the positional bindings a geom needs; [`Resolver`]
//! turns a row into render-space values through the trained scales.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::scale::{PositionScale, ScaleKey};

use super::aes::{Aes, AesName, Aesthetic};
use super::data::{DataValue, Row};
use super::geom::{LayerContext, PointShape};
use super::train::TrainedScales;

/// Vertical axis a layer is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Left axis (`y` or `yLeft`).
    #[default]
    Left,
    /// Right axis (`yRight`).
    Right,
}

/// Resolved positional bindings: `x` plus the first bound vertical aesthetic.
#[derive(Debug, Clone)]
pub struct XyAes {
    /// Horizontal binding.
    pub x: Aesthetic,
    /// Vertical binding.
    pub y: Aesthetic,
    /// Which vertical aesthetic was bound.
    pub y_name: AesName,
    /// Axis the vertical binding scales against.
    pub side: Side,
}

impl XyAes {
    /// Resolve `x` and one of `y`, `yLeft`, `yRight` (in that order).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAesthetic`] when `x` is unbound and
    /// [`Error::MissingVerticalAesthetic`] when no vertical aesthetic is bound.
    pub fn resolve(geom: &'static str, aes: &Aes) -> Result<Self> {
        let x = aes.get(AesName::X).cloned().ok_or(Error::MissingAesthetic {
            geom,
            aesthetic: AesName::X,
        })?;

        let (y_name, y) = AesName::VERTICAL
            .iter()
            .find_map(|&name| aes.get(name).map(|a| (name, a.clone())))
            .ok_or(Error::MissingVerticalAesthetic { geom })?;

        let side = if y_name == AesName::YRight {
            Side::Right
        } else {
            Side::Left
        };

        Ok(Self { x, y, y_name, side })
    }
}

/// Require a non-positional binding.
///
/// # Errors
///
/// Returns [`Error::MissingAesthetic`] when `name` is unbound.
pub(crate) fn require(geom: &'static str, aes: &Aes, name: AesName) -> Result<Aesthetic> {
    aes.get(name).cloned().ok_or(Error::MissingAesthetic {
        geom,
        aesthetic: name,
    })
}

/// Per-layer view over the trained scales.
#[derive(Debug)]
pub struct Resolver<'a> {
    layer: &'a LayerContext<'a>,
    scales: &'a TrainedScales,
    xy: &'a XyAes,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for one layer.
    #[must_use]
    pub fn new(layer: &'a LayerContext<'a>, scales: &'a TrainedScales, xy: &'a XyAes) -> Self {
        Self { layer, scales, xy }
    }

    /// The vertical scale this layer draws against.
    #[must_use]
    pub fn y_scale(&self) -> &'a PositionScale {
        self.scales.y(self.xy.side)
    }

    /// Scaled x, or `None` when the row has no usable x.
    #[must_use]
    pub fn x(&self, row: &Row) -> Option<f32> {
        self.scales.x.map(&self.xy.x.value(row))
    }

    /// Scaled y, or `None` when the row has no usable y.
    #[must_use]
    pub fn y(&self, row: &Row) -> Option<f32> {
        self.y_scale().map(&self.xy.y.value(row))
    }

    /// Scaled `(x, y)` when both resolve.
    #[must_use]
    pub fn position(&self, row: &Row) -> Option<(f32, f32)> {
        Some((self.x(row)?, self.y(row)?))
    }

    /// Scale key for a discrete lookup, qualified by the layer's series.
    #[must_use]
    pub fn key(&self, value: &DataValue) -> Option<ScaleKey> {
        value.key().map(|k| ScaleKey::new(k, self.layer.series))
    }

    /// Color of a domain value, or `default` when it has none.
    #[must_use]
    pub fn color_of(&self, value: &DataValue, default: Rgba) -> Rgba {
        self.scales
            .color(value, self.layer.series)
            .unwrap_or(default)
    }

    /// Per-row color from the `color` aesthetic.
    #[must_use]
    pub fn color(&self, row: &Row, default: Rgba) -> Rgba {
        match self.layer.aes.get(AesName::Color) {
            Some(a) => self.color_of(&a.value(row), default),
            None => default,
        }
    }

    /// Size of a domain value, or `default` when it has none.
    #[must_use]
    pub fn size_of(&self, value: &DataValue, default: f32) -> f32 {
        self.scales
            .size(value)
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(default)
    }

    /// Per-row size from the `size` aesthetic.
    #[must_use]
    pub fn size(&self, row: &Row, default: f32) -> f32 {
        match self.layer.aes.get(AesName::Size) {
            Some(a) => self.size_of(&a.value(row), default),
            None => default,
        }
    }

    /// Per-row marker shape from the `pointType` aesthetic.
    #[must_use]
    pub fn shape(&self, row: &Row, default: PointShape) -> PointShape {
        self.layer
            .aes
            .get(AesName::PointType)
            .and_then(|a| self.key(&a.value(row)))
            .and_then(|key| self.scales.shape.get(&key))
            .unwrap_or(default)
    }

    /// Per-row display text of a text aesthetic.
    #[must_use]
    pub fn text(&self, row: &Row, name: AesName) -> Option<String> {
        self.layer
            .aes
            .get(name)
            .and_then(|a| a.value(row).display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_y() {
        let aes = Aes::new().x("a").y("b").y_right("c");
        let xy = XyAes::resolve("Point", &aes).unwrap();
        assert_eq!(xy.y_name, AesName::Y);
        assert_eq!(xy.side, Side::Left);
    }

    #[test]
    fn test_resolve_right_axis() {
        let aes = Aes::new().x("a").y_right("c");
        let xy = XyAes::resolve("Point", &aes).unwrap();
        assert_eq!(xy.y_name, AesName::YRight);
        assert_eq!(xy.side, Side::Right);
    }

    #[test]
    fn test_resolve_y_left() {
        let aes = Aes::new().x("a").y_left("b");
        let xy = XyAes::resolve("Path", &aes).unwrap();
        assert_eq!(xy.y_name, AesName::YLeft);
        assert_eq!(xy.side, Side::Left);
    }

    #[test]
    fn test_resolve_missing_x() {
        let err = XyAes::resolve("Point", &Aes::new().y("b")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAesthetic {
                geom: "Point",
                aesthetic: AesName::X
            }
        ));
    }

    #[test]
    fn test_resolve_missing_vertical() {
        let err = XyAes::resolve("Path", &Aes::new().x("a").color("c")).unwrap_err();
        assert!(matches!(err, Error::MissingVerticalAesthetic { geom: "Path" }));
    }

    #[test]
    fn test_require() {
        let aes = Aes::new().error("e");
        assert!(require("ErrorBar", &aes, AesName::Error).is_ok());
        assert!(require("Text", &aes, AesName::Label).is_err());
    }
}
