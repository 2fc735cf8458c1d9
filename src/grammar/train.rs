//! Scale training.
//!
//! Training runs once per render, before anything is drawn. Every layer
//! reports the domain values it will draw into a [`ScaleTrainer`], which then
//! builds the shared [`TrainedScales`]. Drawing only ever reads them.

use std::collections::HashSet;

use tracing::warn;

use crate::color::Rgba;
use crate::error::Result;
use crate::scale::{
    domain_of, ColorScale, ContinuousScale, DiscreteScale, LinearScale, PointScale,
    PositionScale, Scale, ScaleKey, ScaleSpec, ScaleSpecs, ScaleType, Trans,
};

use super::aes::AesName;
use super::data::DataValue;
use super::geom::{LayerContext, PointShape};
use super::resolve::{Side, XyAes};

/// Fraction of the trained span added on each side of a continuous domain.
const DOMAIN_PADDING: f32 = 0.05;

/// Values seen for one aesthetic.
#[derive(Debug, Clone, Default)]
struct Observations {
    numbers: Vec<f32>,
    keys: Vec<String>,
    seen: HashSet<String>,
    has_text: bool,
}

impl Observations {
    fn observe(&mut self, value: &DataValue) {
        if value.is_null() {
            return;
        }
        match value.as_f32() {
            Some(n) => self.numbers.push(n),
            None => self.has_text = true,
        }
        if let Some(key) = value.key() {
            if self.seen.insert(key.clone()) {
                self.keys.push(key);
            }
        }
    }

    fn observe_number(&mut self, n: f32) {
        if n.is_finite() {
            self.numbers.push(n);
        }
    }
}

/// Collects domain values from every layer before scales are built.
#[derive(Debug, Clone)]
pub struct ScaleTrainer {
    x: Observations,
    y_left: Observations,
    y_right: Observations,
    right_axis: bool,
    color_keys: DiscreteScale<Rgba>,
    color_numbers: Vec<f32>,
    shape: DiscreteScale<PointShape>,
    size: Observations,
}

impl Default for ScaleTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleTrainer {
    /// Create an empty trainer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: Observations::default(),
            y_left: Observations::default(),
            y_right: Observations::default(),
            right_axis: false,
            color_keys: DiscreteScale::category10(),
            color_numbers: Vec::new(),
            shape: DiscreteScale::shapes(),
            size: Observations::default(),
        }
    }

    /// Record an x value.
    pub fn observe_x(&mut self, value: &DataValue) {
        self.x.observe(value);
    }

    /// Record a vertical value against `side`.
    pub fn observe_y(&mut self, side: Side, value: &DataValue) {
        self.vertical(side).observe(value);
    }

    /// Record a raw vertical number (e.g. an error-bar end) against `side`.
    pub fn observe_y_number(&mut self, side: Side, n: f32) {
        self.vertical(side).observe_number(n);
    }

    fn vertical(&mut self, side: Side) -> &mut Observations {
        match side {
            Side::Left => &mut self.y_left,
            Side::Right => {
                self.right_axis = true;
                &mut self.y_right
            }
        }
    }

    /// Record a color value for `series`.
    pub fn observe_color(&mut self, value: &DataValue, series: Option<&str>) {
        if let Some(n) = value.as_f32() {
            self.color_numbers.push(n);
        }
        if let Some(key) = value.key() {
            self.color_keys.train(ScaleKey::new(key, series));
        }
    }

    /// Record a shape value for `series`.
    pub fn observe_shape(&mut self, value: &DataValue, series: Option<&str>) {
        if let Some(key) = value.key() {
            self.shape.train(ScaleKey::new(key, series));
        }
    }

    /// Record a size value.
    pub fn observe_size(&mut self, value: &DataValue) {
        self.size.observe(value);
    }

    /// Record every row-level aesthetic of a layer.
    pub fn observe_rows(&mut self, layer: &LayerContext<'_>, xy: &XyAes) {
        if xy.side == Side::Right {
            self.right_axis = true;
        }
        let color = layer.aes.get(AesName::Color);
        let shape = layer.aes.get(AesName::PointType);
        let size = layer.aes.get(AesName::Size);

        for row in layer.data {
            self.observe_x(&xy.x.value(row));
            self.observe_y(xy.side, &xy.y.value(row));
            if let Some(a) = color {
                self.observe_color(&a.value(row), layer.series);
            }
            if let Some(a) = shape {
                self.observe_shape(&a.value(row), layer.series);
            }
            if let Some(a) = size {
                self.observe_size(&a.value(row));
            }
        }
    }

    /// Whether the trained color scale will be a discrete legend.
    #[must_use]
    pub fn has_discrete_color(&self, specs: &ScaleSpecs) -> bool {
        !self.color_keys.is_empty() && !is_continuous(specs.color.as_ref())
    }

    /// Build the shared scales for a grid of `grid_width` x `grid_height`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured domain is invalid for its scale
    /// (equal bounds, or non-positive bounds on a log scale).
    pub fn finish(
        self,
        specs: &ScaleSpecs,
        grid_width: f32,
        grid_height: f32,
    ) -> Result<TrainedScales> {
        let x = position_scale(AesName::X, &self.x, specs.x.as_ref(), (0.0, grid_width))?;
        let y_left = position_scale(
            AesName::Y,
            &self.y_left,
            specs.y.as_ref(),
            (0.0, grid_height),
        )?;
        let y_right = if self.right_axis {
            Some(position_scale(
                AesName::YRight,
                &self.y_right,
                specs.y_right.as_ref(),
                (0.0, grid_height),
            )?)
        } else {
            None
        };

        let color = if is_continuous(specs.color.as_ref()) {
            let domain = numeric_domain(&self.color_numbers, specs.color.as_ref());
            ColorMapping::Continuous(ColorScale::viridis(domain)?)
        } else {
            ColorMapping::Discrete(self.color_keys)
        };

        let size = match &specs.size {
            Some(spec) if spec.scale_type != Some(ScaleType::Discrete) => match spec.range {
                Some(range) => Some(LinearScale::new(
                    numeric_domain(&self.size.numbers, Some(spec)),
                    range,
                )?),
                None => None,
            },
            _ => None,
        };

        Ok(TrainedScales {
            x,
            y_left,
            y_right,
            color,
            shape: self.shape,
            size,
        })
    }
}

fn is_continuous(spec: Option<&ScaleSpec>) -> bool {
    spec.and_then(|s| s.scale_type) == Some(ScaleType::Continuous)
}

/// Build a positional scale; the type is inferred from the data when not
/// configured (any text value makes it discrete).
fn position_scale(
    aes: AesName,
    obs: &Observations,
    spec: Option<&ScaleSpec>,
    grid: (f32, f32),
) -> Result<PositionScale> {
    let range = spec.and_then(|s| s.range).unwrap_or(grid);
    let inferred = if obs.has_text {
        ScaleType::Discrete
    } else {
        ScaleType::Continuous
    };

    match spec.and_then(|s| s.scale_type).unwrap_or(inferred) {
        ScaleType::Discrete => Ok(PositionScale::Discrete(PointScale::new(
            obs.keys.clone(),
            range,
        ))),
        ScaleType::Continuous => {
            let trans = spec.map(|s| s.trans).unwrap_or_default();
            let domain = continuous_domain(aes, &obs.numbers, trans, spec);
            ContinuousScale::new(trans, domain, range).map(PositionScale::Continuous)
        }
    }
}

/// Padded trained domain with configured bounds applied.
fn continuous_domain(
    aes: AesName,
    values: &[f32],
    trans: Trans,
    spec: Option<&ScaleSpec>,
) -> (f32, f32) {
    let trained = match trans {
        Trans::Linear => domain_of(values).map(|(lo, hi)| pad_linear(lo, hi)),
        Trans::Log => {
            let positive: Vec<f32> = values.iter().copied().filter(|v| *v > 0.0).collect();
            if positive.len() < values.len() {
                warn!(
                    aesthetic = %aes,
                    ignored = values.len() - positive.len(),
                    "log scale ignores non-positive values"
                );
            }
            let domain = domain_of(&positive).map(|(lo, hi)| pad_log(lo, hi));
            if domain.is_none() && !values.is_empty() {
                warn!(aesthetic = %aes, "log scale has no positive values, using default domain");
            }
            domain
        }
    };

    let (lo, hi) = trained.unwrap_or(match trans {
        Trans::Linear => (0.0, 1.0),
        Trans::Log => (1.0, 10.0),
    });

    (
        spec.and_then(|s| s.min).unwrap_or(lo),
        spec.and_then(|s| s.max).unwrap_or(hi),
    )
}

/// Unpadded numeric domain (color and size), widened when degenerate.
fn numeric_domain(values: &[f32], spec: Option<&ScaleSpec>) -> (f32, f32) {
    let (lo, hi) = match domain_of(values) {
        Some((lo, hi)) if hi - lo < f32::EPSILON => (lo - 1.0, hi + 1.0),
        Some(domain) => domain,
        None => (0.0, 1.0),
    };
    (
        spec.and_then(|s| s.min).unwrap_or(lo),
        spec.and_then(|s| s.max).unwrap_or(hi),
    )
}

fn pad_linear(lo: f32, hi: f32) -> (f32, f32) {
    if hi - lo < f32::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * DOMAIN_PADDING;
    (lo - pad, hi + pad)
}

fn pad_log(lo: f32, hi: f32) -> (f32, f32) {
    let (l, h) = (lo.log10(), hi.log10());
    if h - l < f32::EPSILON {
        return (lo / 10.0, hi * 10.0);
    }
    let pad = (h - l) * DOMAIN_PADDING;
    (10f32.powf(l - pad), 10f32.powf(h + pad))
}

/// Trained color scale.
#[derive(Debug, Clone)]
pub enum ColorMapping {
    /// Categorical palette keyed by value and series.
    Discrete(DiscreteScale<Rgba>),
    /// Gradient over a numeric domain.
    Continuous(ColorScale),
}

/// Scales shared by every layer of one render.
#[derive(Debug, Clone)]
pub struct TrainedScales {
    /// Horizontal position.
    pub x: PositionScale,
    /// Left vertical position.
    pub y_left: PositionScale,
    /// Right vertical position, when any layer binds `yRight`.
    pub y_right: Option<PositionScale>,
    /// Color.
    pub color: ColorMapping,
    /// Marker shape.
    pub shape: DiscreteScale<PointShape>,
    /// Size, when a ranged size scale is configured.
    pub size: Option<LinearScale>,
}

impl TrainedScales {
    /// Vertical scale for `side`; the right side falls back to the left.
    #[must_use]
    pub fn y(&self, side: Side) -> &PositionScale {
        match side {
            Side::Left => &self.y_left,
            Side::Right => self.y_right.as_ref().unwrap_or(&self.y_left),
        }
    }

    /// Color of a domain value for `series`.
    #[must_use]
    pub fn color(&self, value: &DataValue, series: Option<&str>) -> Option<Rgba> {
        match &self.color {
            ColorMapping::Discrete(s) => s.get(&ScaleKey::new(value.key()?, series)),
            ColorMapping::Continuous(s) => value.as_f32().map(|v| s.scale(v)),
        }
    }

    /// Size of a domain value: scaled when a size scale exists, raw otherwise.
    #[must_use]
    pub fn size(&self, value: &DataValue) -> Option<f32> {
        let v = value.as_f32()?;
        Some(match &self.size {
            Some(s) => s.scale(v),
            None => v,
        })
    }

    /// Legend entries of a discrete color scale.
    #[must_use]
    pub fn legend(&self) -> Vec<(String, Rgba)> {
        match &self.color {
            ColorMapping::Discrete(s) => s.entries().map(|(k, c)| (k.label(), c)).collect(),
            ColorMapping::Continuous(_) => Vec::new(),
        }
    }
}
