//! Path geom: one polyline per group.

use std::collections::HashMap;

use tracing::debug;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::aes::{Aes, AesName, Aesthetic};
use crate::grammar::data::{DataValue, Row};
use crate::grammar::resolve::{Resolver, XyAes};
use crate::grammar::train::{ScaleTrainer, TrainedScales};
use crate::render::{Canvas, Primitive};

use super::{Geom, LayerContext};

/// Straight segments through consecutive rows, split by `group`.
#[derive(Debug, Clone)]
pub struct PathGeom {
    size: f32,
    color: Rgba,
    opacity: f32,
}

impl Default for PathGeom {
    fn default() -> Self {
        Self {
            size: 2.0,
            color: Rgba::BLACK,
            opacity: 1.0,
        }
    }
}

/// Rows sharing one group value, in input order.
struct Group<'a> {
    value: DataValue,
    rows: Vec<&'a Row>,
}

/// Partition rows by group key, groups in first-seen order.
fn partition<'a>(rows: &'a [Row], group: &Aesthetic) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for row in rows {
        let value = group.value(row);
        let i = *index.entry(value.key()).or_insert_with(|| {
            groups.push(Group {
                value: value.clone(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].rows.push(row);
    }
    groups
}

impl PathGeom {
    /// Black paths of width 2.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stroke width when `size` is unbound.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Stroke color when no color aesthetic is bound.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Stroke opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Stroke color binding: `pathColor` wins over `color`.
    fn color_binding(aes: &Aes) -> Option<&Aesthetic> {
        aes.get(AesName::PathColor).or_else(|| aes.get(AesName::Color))
    }

    /// Domain value driving a group's color.
    ///
    /// When the color binding is the group binding, the group's own value is
    /// reused instead of re-resolving it from the rows.
    fn group_color_value(
        color: &Aesthetic,
        group_binding: &Aesthetic,
        group: &Group<'_>,
    ) -> DataValue {
        if color.same_binding(group_binding) {
            group.value.clone()
        } else {
            color.group_value(&group.rows)
        }
    }
}

impl Geom for PathGeom {
    fn name(&self) -> &'static str {
        "Path"
    }

    fn train(&self, layer: &LayerContext<'_>, trainer: &mut ScaleTrainer) -> Result<()> {
        let xy = self.init_aesthetics(layer.aes)?;
        observe_positions(layer, &xy, trainer);

        let Some(group_binding) = layer.aes.get(AesName::Group) else {
            return Ok(());
        };
        let color = Self::color_binding(layer.aes);
        let size = layer.aes.get(AesName::Size);

        for group in partition(layer.data, group_binding) {
            if let Some(c) = color {
                let value = Self::group_color_value(c, group_binding, &group);
                trainer.observe_color(&value, layer.series);
            }
            if let Some(s) = size {
                trainer.observe_size(&s.group_value(&group.rows));
            }
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
        let resolver = Resolver::new(layer, scales, &xy);
        let size = layer.aes.get(AesName::Size);

        let width_of = |rows: &[&Row]| match size {
            Some(s) => resolver.size_of(&s.group_value(rows), self.size),
            None => self.size,
        };
        let points_of = |rows: &[&Row]| -> Vec<Point> {
            rows.iter()
                .filter_map(|row| resolver.position(row))
                .map(|(x, y)| Point::chart(x, y))
                .collect()
        };

        let mut drawn = 0;
        match layer.aes.get(AesName::Group) {
            Some(group_binding) => {
                let color = Self::color_binding(layer.aes);
                for group in partition(layer.data, group_binding) {
                    let points = points_of(&group.rows);
                    if points.is_empty() {
                        continue;
                    }
                    let stroke = match color {
                        Some(c) => resolver.color_of(
                            &Self::group_color_value(c, group_binding, &group),
                            self.color,
                        ),
                        None => self.color,
                    };
                    canvas.draw(Primitive::Polyline {
                        points,
                        stroke: stroke.with_opacity(self.opacity),
                        width: width_of(&group.rows),
                    });
                    drawn += 1;
                }
            }
            None => {
                let rows: Vec<&Row> = layer.data.iter().collect();
                let points = points_of(&rows);
                if !points.is_empty() {
                    canvas.draw(Primitive::Polyline {
                        points,
                        stroke: self.color.with_opacity(self.opacity),
                        width: width_of(&rows),
                    });
                    drawn += 1;
                }
            }
        }

        debug!(geom = self.name(), rows = layer.data.len(), paths = drawn, "rendered paths");
        Ok(drawn)
    }
}

fn observe_positions(layer: &LayerContext<'_>, xy: &XyAes, trainer: &mut ScaleTrainer) {
    for row in layer.data {
        trainer.observe_x(&xy.x.value(row));
        trainer.observe_y(xy.side, &xy.y.value(row));
    }
}
