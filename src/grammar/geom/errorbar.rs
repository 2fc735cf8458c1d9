//! Error bar geom: `value ± error` as an "I" per row.

use tracing::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::aes::{Aes, AesName};
use crate::grammar::resolve::{require, Resolver, XyAes};
use crate::grammar::train::{ScaleTrainer, TrainedScales};
use crate::render::{Canvas, Primitive};
use crate::scale::{PositionScale, Scale};

use super::{Geom, LayerContext};

/// Vertical stem from `y - error` to `y + error` with horizontal caps.
#[derive(Debug, Clone)]
pub struct ErrorBarGeom {
    color: Rgba,
    width: f32,
    cap_width: f32,
    crisp: bool,
}

impl Default for ErrorBarGeom {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            width: 1.0,
            cap_width: 6.0,
            crisp: false,
        }
    }
}

impl ErrorBarGeom {
    /// Black bars with 6px half-width caps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bar color when `color` is unbound.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Stroke width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Half-width of the caps.
    #[must_use]
    pub fn cap_width(mut self, cap_width: f32) -> Self {
        self.cap_width = cap_width;
        self
    }

    /// Snap vertical positions to pixel centers (`floor + 0.5`).
    #[must_use]
    pub fn crisp(mut self, crisp: bool) -> Self {
        self.crisp = crisp;
        self
    }

    fn snap(&self, y: f32) -> f32 {
        if self.crisp {
            y.floor() + 0.5
        } else {
            y
        }
    }
}

/// Scaled `(top, bottom)` of `value ± error`, clamped to the scale's extent.
///
/// An end with no finite image (below a log domain) is pinned to the start
/// of the range. Returns `None` for discrete scales and non-finite inputs.
#[must_use]
pub fn error_extent(scale: &PositionScale, value: f32, error: f32) -> Option<(f32, f32)> {
    let PositionScale::Continuous(continuous) = scale else {
        return None;
    };
    if !value.is_finite() || !error.is_finite() {
        return None;
    }
    let error = error.abs();
    let floor = continuous.range().0;
    let extent = scale.extent();
    let end = |v: f32| extent.clamp(scale.map_number(v).unwrap_or(floor));
    Some((end(value + error), end(value - error)))
}

impl Geom for ErrorBarGeom {
    fn name(&self) -> &'static str {
        "ErrorBar"
    }

    fn init_aesthetics(&self, aes: &Aes) -> Result<XyAes> {
        let xy = XyAes::resolve(self.name(), aes)?;
        require(self.name(), aes, AesName::Error)?;
        Ok(xy)
    }

    fn train(&self, layer: &LayerContext<'_>, trainer: &mut ScaleTrainer) -> Result<()> {
        let xy = self.init_aesthetics(layer.aes)?;
        trainer.observe_rows(layer, &xy);

        let error = require(self.name(), layer.aes, AesName::Error)?;
        for row in layer.data {
            let (Some(v), Some(e)) = (xy.y.value(row).as_f32(), error.value(row).as_f32()) else {
                continue;
            };
            trainer.observe_y_number(xy.side, v + e.abs());
            trainer.observe_y_number(xy.side, v - e.abs());
        }
        Ok(())
    }

    fn render(
        &self,
        layer: &LayerContext<'_>,
        scales: &TrainedScales,
        canvas: &mut dyn Canvas,
    ) -> Result<usize> {
        let xy = self.init_aesthetics(layer.aes)?;
        let error = require(self.name(), layer.aes, AesName::Error)?;
        let resolver = Resolver::new(layer, scales, &xy);
        let y_scale = resolver.y_scale();

        let mut bars = 0;
        for row in layer.data {
            let Some(x) = resolver.x(row) else { continue };
            let (Some(v), Some(e)) = (xy.y.value(row).as_f32(), error.value(row).as_f32()) else {
                continue;
            };
            let Some((top, bottom)) = error_extent(y_scale, v, e) else {
                continue;
            };

            let stroke = resolver.color(row, self.color);
            let (top, bottom) = (self.snap(-top), self.snap(-bottom));
            let segments = [
                (Point::new(x - self.cap_width, top), Point::new(x + self.cap_width, top)),
                (Point::new(x, top), Point::new(x, bottom)),
                (
                    Point::new(x - self.cap_width, bottom),
                    Point::new(x + self.cap_width, bottom),
                ),
            ];
            for (from, to) in segments {
                canvas.draw(Primitive::Line {
                    from,
                    to,
                    stroke,
                    width: self.width,
                });
            }
            bars += 1;
        }

        debug!(geom = self.name(), rows = layer.data.len(), bars, "rendered error bars");
        Ok(bars * 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grammar::geom::test_support::train_one;
    use crate::grammar::{Row, Side};
    use crate::render::DrawList;
    use crate::scale::{ScaleSpec, ScaleSpecs};
    use approx::assert_relative_eq;

    fn extent_specs() -> ScaleSpecs {
        ScaleSpecs {
            x: Some(ScaleSpec::continuous().min(-10.0).max(10.0).range(-10.0, 10.0)),
            y: Some(
                ScaleSpec::continuous()
                    .min(-100.0)
                    .max(100.0)
                    .range(-100.0, 100.0),
            ),
            ..ScaleSpecs::default()
        }
    }

    fn lines(geom: &ErrorBarGeom, data: &[Row]) -> Vec<(Point, Point)> {
        let aes = Aes::new().x("x").y("y").error("e");
        let layer = LayerContext {
            data,
            aes: &aes,
            series: None,
        };
        let scales = train_one(geom, &layer, &extent_specs(), (20.0, 200.0));
        let mut canvas = DrawList::new();
        geom.render(&layer, &scales, &mut canvas).unwrap();
        canvas
            .primitives()
            .map(|p| match p {
                Primitive::Line { from, to, .. } => (*from, *to),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_bar_within_extent() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 3.0)];
        let l = lines(&ErrorBarGeom::new(), &data);
        assert_eq!(l.len(), 3);

        let (cap_from, cap_to) = l[0];
        assert_relative_eq!(cap_from.x, -6.0);
        assert_relative_eq!(cap_to.x, 6.0);
        assert_relative_eq!(cap_from.y, -13.0, epsilon = 1e-4);

        let (stem_top, stem_bottom) = l[1];
        assert_relative_eq!(stem_top.y, -13.0, epsilon = 1e-4);
        assert_relative_eq!(stem_bottom.y, -7.0, epsilon = 1e-4);
    }

    #[test]
    fn test_huge_error_clamped() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 1000.0)];
        let l = lines(&ErrorBarGeom::new(), &data);
        let (top, bottom) = l[1];
        assert_relative_eq!(top.y, -100.0);
        assert_relative_eq!(bottom.y, 100.0);
    }

    #[test]
    fn test_crisp_snapping() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 3.0)];
        let l = lines(&ErrorBarGeom::new().crisp(true), &data);
        for (from, to) in l {
            assert_relative_eq!(from.y - from.y.floor(), 0.5);
            assert_relative_eq!(to.y - to.y.floor(), 0.5);
        }
    }

    #[test]
    fn test_rows_without_error_skipped() {
        let data = vec![
            Row::new().with("x", 0.0).with("y", 10.0),
            Row::new().with("x", 0.0).with("y", 10.0).with("e", "big"),
        ];
        assert!(lines(&ErrorBarGeom::new(), &data).is_empty());
    }

    #[test]
    fn test_missing_error_aesthetic() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 3.0)];
        let aes = Aes::new().x("x").y("y");
        let layer = LayerContext {
            data: &data,
            aes: &aes,
            series: None,
        };
        let geom = ErrorBarGeom::new();
        let mut trainer = ScaleTrainer::new();
        assert!(matches!(
            geom.train(&layer, &mut trainer),
            Err(Error::MissingAesthetic {
                aesthetic: AesName::Error,
                ..
            })
        ));

        let scales = trainer.finish(&extent_specs(), 20.0, 200.0).unwrap();
        let mut canvas = DrawList::new();
        assert!(geom.render(&layer, &scales, &mut canvas).is_err());
        assert_eq!(canvas.primitives().count(), 0);
    }

    #[test]
    fn test_training_includes_error_ends() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 5.0)];
        let aes = Aes::new().x("x").y("y").error("e");
        let layer = LayerContext {
            data: &data,
            aes: &aes,
            series: None,
        };
        let scales = train_one(
            &ErrorBarGeom::new(),
            &layer,
            &ScaleSpecs::default(),
            (10.0, 100.0),
        );
        let (top, bottom) = error_extent(&scales.y_left, 10.0, 5.0).unwrap();
        assert!(top < 100.0);
        assert!(bottom > 0.0);
    }

    #[test]
    fn test_error_extent_negative_error() {
        let mut trainer = ScaleTrainer::new();
        trainer.observe_y_number(Side::Left, 0.0);
        let scales = trainer.finish(&extent_specs(), 20.0, 200.0).unwrap();
        let (top, bottom) = error_extent(&scales.y_left, 0.0, -5.0).unwrap();
        assert!(top > bottom);
    }

    #[test]
    fn test_log_scale_bottom_pinned_to_range() {
        let data = vec![Row::new().with("x", 0.0).with("y", 10.0).with("e", 1000.0)];
        let aes = Aes::new().x("x").y("y").error("e");
        let layer = LayerContext {
            data: &data,
            aes: &aes,
            series: None,
        };
        let specs = ScaleSpecs {
            x: Some(ScaleSpec::continuous().min(-10.0).max(10.0).range(-10.0, 10.0)),
            y: Some(ScaleSpec::log().min(1.0).max(100.0)),
            ..ScaleSpecs::default()
        };
        let geom = ErrorBarGeom::new();
        let scales = train_one(&geom, &layer, &specs, (20.0, 200.0));

        let (top, bottom) = error_extent(&scales.y_left, 10.0, 1000.0).unwrap();
        assert_relative_eq!(top, 200.0, epsilon = 1e-3);
        assert_relative_eq!(bottom, 0.0, epsilon = 1e-3);

        let mut canvas = DrawList::new();
        assert_eq!(geom.render(&layer, &scales, &mut canvas).unwrap(), 3);
        assert_eq!(canvas.primitives().count(), 3);
    }

    #[test]
    fn test_error_extent_non_finite_skipped() {
        let mut trainer = ScaleTrainer::new();
        trainer.observe_y_number(Side::Left, 0.0);
        let scales = trainer.finish(&extent_specs(), 20.0, 200.0).unwrap();
        assert!(error_extent(&scales.y_left, 0.0, f32::NAN).is_none());
        assert!(error_extent(&scales.y_left, f32::INFINITY, 1.0).is_none());
    }
}
