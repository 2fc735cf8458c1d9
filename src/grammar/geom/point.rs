//! Point geom: one marker per row.

use tracing::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::aes::AesName;
use crate::grammar::resolve::Resolver;
use crate::grammar::train::TrainedScales;
use crate::render::{Canvas, Primitive};

use super::{Geom, LayerContext, PointShape};

/// Horizontal placement of points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Draw at the scaled x.
    #[default]
    Identity,
    /// Offset x by a deterministic amount in `[-width / 2, width / 2)`.
    Jitter {
        /// Total jitter width in pixels.
        width: f32,
    },
}

/// Marker per row at `(x, -y)`.
#[derive(Debug, Clone)]
pub struct PointGeom {
    size: f32,
    color: Rgba,
    opacity: f32,
    shape: PointShape,
    position: Position,
    plot_null_points: bool,
}

impl Default for PointGeom {
    fn default() -> Self {
        Self {
            size: 5.0,
            color: Rgba::BLACK,
            opacity: 1.0,
            shape: PointShape::Circle,
            position: Position::Identity,
            plot_null_points: false,
        }
    }
}

impl PointGeom {
    /// Black circles of size 5.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker size when `size` is unbound.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Marker color when `color` is unbound.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Marker opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Marker shape when `pointType` is unbound.
    #[must_use]
    pub fn shape(mut self, shape: PointShape) -> Self {
        self.shape = shape;
        self
    }

    /// Horizontal placement.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Draw rows with a null y as hollow markers on the bottom of the grid.
    #[must_use]
    pub fn plot_null_points(mut self, enabled: bool) -> Self {
        self.plot_null_points = enabled;
        self
    }

    fn jitter(&self, index: usize) -> f32 {
        match self.position {
            Position::Identity => 0.0,
            Position::Jitter { width } => jitter_offset(index, width),
        }
    }
}

/// Deterministic pseudo-random offset for row `index`.
fn jitter_offset(index: usize, width: f32) -> f32 {
    let seed = (index as u64)
        .wrapping_add(1)
        .wrapping_mul(1_103_515_245)
        .wrapping_add(12345);
    let unit = ((seed >> 8) % 1000) as f32 / 1000.0;
    (unit - 0.5) * width
}

impl Geom for PointGeom {
    fn name(&self) -> &'static str {
        "Point"
    }

    fn render(
        &self,
        layer: &LayerContext<'_>,
        scales: &TrainedScales,
        canvas: &mut dyn Canvas,
    ) -> Result<usize> {
        let xy = self.init_aesthetics(layer.aes)?;
        let resolver = Resolver::new(layer, scales, &xy);
        let bottom = resolver.y_scale().extent().min;

        let mut drawn = 0;
        let mut skipped = 0;
        for (i, row) in layer.data.iter().enumerate() {
            let Some(x) = resolver.x(row) else {
                skipped += 1;
                continue;
            };
            let color = resolver.color(row, self.color).with_opacity(self.opacity);
            let (y, fill) = match resolver.y(row) {
                Some(y) => (y, Some(color)),
                None if self.plot_null_points && xy.y.value(row).is_null() => (bottom, None),
                None => {
                    skipped += 1;
                    continue;
                }
            };

            canvas.draw(Primitive::Marker {
                center: Point::chart(x + self.jitter(i), y),
                shape: resolver.shape(row, self.shape),
                size: resolver.size(row, self.size),
                fill,
                stroke: color,
                title: resolver.text(row, AesName::HoverText),
            });
            drawn += 1;
        }

        debug!(geom = self.name(), rows = layer.data.len(), drawn, skipped, "rendered points");
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grammar::geom::test_support::train_one;
    use crate::grammar::{Aes, DataValue, Row};
    use crate::render::DrawList;
    use crate::scale::{ScaleSpec, ScaleSpecs};
    use approx::assert_relative_eq;

    fn identity_specs() -> ScaleSpecs {
        ScaleSpecs {
            x: Some(ScaleSpec::continuous().min(0.0).max(10.0).range(0.0, 10.0)),
            y: Some(ScaleSpec::continuous().min(0.0).max(10.0).range(0.0, 10.0)),
            ..ScaleSpecs::default()
        }
    }

    fn render(geom: &PointGeom, data: &[Row], aes: &Aes) -> (Result<usize>, DrawList) {
        let layer = LayerContext {
            data,
            aes,
            series: None,
        };
        let scales = train_one(geom, &layer, &identity_specs(), (10.0, 10.0));
        let mut canvas = DrawList::new();
        let result = geom.render(&layer, &scales, &mut canvas);
        (result, canvas)
    }

    fn markers(canvas: &DrawList) -> Vec<Primitive> {
        canvas.primitives().filter(|p| p.is_marker()).cloned().collect()
    }

    #[test]
    fn test_points_at_inverted_y() {
        let data = vec![
            Row::new().with("x", 1.0).with("y", 2.0),
            Row::new().with("x", 2.0).with("y", 4.0),
        ];
        let (result, canvas) = render(&PointGeom::new(), &data, &Aes::new().x("x").y("y"));
        assert_eq!(result.unwrap(), 2);

        let m = markers(&canvas);
        match &m[1] {
            Primitive::Marker {
                center,
                shape,
                size,
                fill,
                ..
            } => {
                assert_relative_eq!(center.x, 2.0);
                assert_relative_eq!(center.y, -4.0);
                assert_eq!(*shape, PointShape::Circle);
                assert_relative_eq!(*size, 5.0);
                assert_eq!(*fill, Some(Rgba::BLACK));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_null_rows_skipped() {
        let data = vec![
            Row::new().with("x", 1.0).with("y", 2.0),
            Row::new().with("x", 1.0),
            Row::new().with("y", 1.0),
            Row::new().with("x", 1.0).with("y", "n/a"),
        ];
        let (result, _) = render(&PointGeom::new(), &data, &Aes::new().x("x").y("y"));
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_plot_null_points() {
        let data = vec![
            Row::new().with("x", 1.0).with("y", DataValue::Null),
            Row::new().with("y", 1.0),
        ];
        let geom = PointGeom::new().plot_null_points(true);
        let (result, canvas) = render(&geom, &data, &Aes::new().x("x").y("y"));
        assert_eq!(result.unwrap(), 1);

        match &markers(&canvas)[0] {
            Primitive::Marker { center, fill, .. } => {
                assert_relative_eq!(center.y, 0.0);
                assert!(fill.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_x_fails_without_drawing() {
        let data = vec![Row::new().with("y", 1.0)];
        let layer_aes = Aes::new().y("y");
        let layer = LayerContext {
            data: &data,
            aes: &layer_aes,
            series: None,
        };
        let geom = PointGeom::new();
        let mut trainer = crate::grammar::ScaleTrainer::new();
        assert!(geom.train(&layer, &mut trainer).is_err());

        let scales = trainer.finish(&ScaleSpecs::default(), 10.0, 10.0).unwrap();
        let mut canvas = DrawList::new();
        let err = geom.render(&layer, &scales, &mut canvas).unwrap_err();
        assert!(matches!(err, Error::MissingAesthetic { .. }));
        assert_eq!(canvas.marker_count(), 0);
    }

    #[test]
    fn test_hover_text_and_size() {
        let data = vec![Row::new()
            .with("x", 1.0)
            .with("y", 1.0)
            .with("s", 8.0)
            .with("label", DataValue::labeled(1.0f32, "one"))];
        let aes = Aes::new().x("x").y("y").size("s").hover_text("label");
        let (_, canvas) = render(&PointGeom::new(), &data, &aes);

        match &markers(&canvas)[0] {
            Primitive::Marker { size, title, .. } => {
                assert_relative_eq!(*size, 8.0);
                assert_eq!(title.as_deref(), Some("one"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_text_size_falls_back_to_default() {
        let data = vec![Row::new().with("x", 1.0).with("y", 1.0).with("s", "big")];
        let geom = PointGeom::new().size(3.0);
        let (_, canvas) = render(&geom, &data, &Aes::new().x("x").y("y").size("s"));
        match &markers(&canvas)[0] {
            Primitive::Marker { size, .. } => assert_relative_eq!(*size, 3.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_shape_and_color_scales() {
        let data = vec![
            Row::new().with("x", 1.0).with("y", 1.0).with("g", "a"),
            Row::new().with("x", 2.0).with("y", 2.0).with("g", "b"),
        ];
        let aes = Aes::new().x("x").y("y").color("g").point_type("g");
        let (_, canvas) = render(&PointGeom::new().opacity(0.5), &data, &aes);
        let m = markers(&canvas);

        let (s0, c0) = match &m[0] {
            Primitive::Marker { shape, stroke, .. } => (*shape, *stroke),
            other => panic!("unexpected {other:?}"),
        };
        let (s1, c1) = match &m[1] {
            Primitive::Marker { shape, stroke, .. } => (*shape, *stroke),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(s0, PointShape::ALL[0]);
        assert_eq!(s1, PointShape::ALL[1]);
        assert_ne!(c0, c1);
        assert_eq!(c0.a, 128);
    }

    #[test]
    fn test_jitter_is_deterministic_and_bounded() {
        for i in 0..200 {
            let a = jitter_offset(i, 10.0);
            assert_eq!(a, jitter_offset(i, 10.0));
            assert!((-5.0..5.0).contains(&a));
        }
        assert_eq!(jitter_offset(3, 0.0), 0.0);
    }

    #[test]
    fn test_jitter_renders_identically_twice() {
        let data: Vec<Row> = (0..5)
            .map(|i| Row::new().with("x", 5.0).with("y", i as f32))
            .collect();
        let geom = PointGeom::new().position(Position::Jitter { width: 2.0 });
        let aes = Aes::new().x("x").y("y");
        let (_, first) = render(&geom, &data, &aes);
        let (_, second) = render(&geom, &data, &aes);
        assert_eq!(first, second);
    }
}
