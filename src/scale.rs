//! Scale functions for data-to-visual mappings.
//!
//! Scales transform domain values into render-space values (positions,
//! colors, sizes, shapes). Continuous scales are linear or logarithmic;
//! discrete scales assign range values to keys in first-seen order.

use std::collections::HashMap;

use trueno::Vector;

use crate::color::{Rgba, CATEGORY10};
use crate::error::{Error, Result};
use crate::geometry::Extent;
use crate::grammar::{DataValue, PointShape};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

// ============================================================================
// Declarative configuration
// ============================================================================

/// Whether a scale maps a numeric interval or a set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScaleType {
    /// Numeric interval mapping.
    Continuous,
    /// Category mapping.
    Discrete,
}

/// Transform applied by a continuous scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trans {
    /// Identity transform.
    #[default]
    Linear,
    /// Base-10 logarithm.
    Log,
}

/// Configuration for one named scale.
///
/// Unset fields are filled in by training: the scale type is inferred from
/// the observed values and the domain from their extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ScaleSpec {
    /// Continuous or discrete; inferred when `None`.
    pub scale_type: Option<ScaleType>,
    /// Transform for continuous scales.
    pub trans: Trans,
    /// Fixed lower domain bound.
    pub min: Option<f32>,
    /// Fixed upper domain bound.
    pub max: Option<f32>,
    /// Output range override.
    pub range: Option<(f32, f32)>,
}

impl ScaleSpec {
    /// A continuous linear scale.
    #[must_use]
    pub fn continuous() -> Self {
        Self {
            scale_type: Some(ScaleType::Continuous),
            ..Self::default()
        }
    }

    /// A continuous base-10 log scale.
    #[must_use]
    pub fn log() -> Self {
        Self {
            scale_type: Some(ScaleType::Continuous),
            trans: Trans::Log,
            ..Self::default()
        }
    }

    /// A discrete scale.
    #[must_use]
    pub fn discrete() -> Self {
        Self {
            scale_type: Some(ScaleType::Discrete),
            ..Self::default()
        }
    }

    /// Fix the lower domain bound.
    #[must_use]
    pub fn min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Fix the upper domain bound.
    #[must_use]
    pub fn max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Override the output range.
    #[must_use]
    pub fn range(mut self, from: f32, to: f32) -> Self {
        self.range = Some((from, to));
        self
    }
}

/// Scale configuration for every scaled aesthetic of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ScaleSpecs {
    /// Horizontal position.
    pub x: Option<ScaleSpec>,
    /// Left vertical position (`y` and `yLeft`).
    pub y: Option<ScaleSpec>,
    /// Right vertical position.
    pub y_right: Option<ScaleSpec>,
    /// Marker and stroke color.
    pub color: Option<ScaleSpec>,
    /// Marker size and stroke width.
    pub size: Option<ScaleSpec>,
}

// ============================================================================
// Continuous scales
// ============================================================================

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Logarithmic scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LogScale {
    /// Create a new base-10 logarithmic scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values or is empty.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain(
                "Log scale domain must be positive".to_string(),
            ));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }
}

impl Scale<f32, f32> for LogScale {
    /// Non-positive inputs have no logarithm and map to NaN.
    fn scale(&self, value: f32) -> f32 {
        if value <= 0.0 {
            return f32::NAN;
        }
        let log_min = self.domain_min.log10();
        let log_max = self.domain_max.log10();
        let log_val = value.log10();

        let t = (log_val - log_min) / (log_max - log_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// A continuous scale with its transform chosen at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ContinuousScale {
    /// Linear transform.
    Linear(LinearScale),
    /// Logarithmic transform.
    Log(LogScale),
}

impl ContinuousScale {
    /// Build a scale for `trans`.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is invalid for the transform.
    pub fn new(trans: Trans, domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        match trans {
            Trans::Linear => LinearScale::new(domain, range).map(Self::Linear),
            Trans::Log => LogScale::new(domain, range).map(Self::Log),
        }
    }

    /// The transform this scale applies.
    #[must_use]
    pub fn trans(&self) -> Trans {
        match self {
            Self::Linear(_) => Trans::Linear,
            Self::Log(_) => Trans::Log,
        }
    }

    /// Tick positions as domain values.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (lo, hi) = self.domain();
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        match self {
            Self::Linear(_) => nice_ticks(lo, hi, count),
            Self::Log(_) => log_ticks(lo, hi),
        }
    }
}

impl Scale<f32, f32> for ContinuousScale {
    fn scale(&self, value: f32) -> f32 {
        match self {
            Self::Linear(s) => s.scale(value),
            Self::Log(s) => s.scale(value),
        }
    }

    fn domain(&self) -> (f32, f32) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
        }
    }

    fn range(&self) -> (f32, f32) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
        }
    }
}

// ============================================================================
// Discrete scales
// ============================================================================

/// Evenly spaced positions for categories, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    categories: Vec<String>,
    range_min: f32,
    range_max: f32,
}

impl PointScale {
    /// Create a point scale over `categories`.
    #[must_use]
    pub fn new(categories: Vec<String>, range: (f32, f32)) -> Self {
        Self {
            categories,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Categories in position order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Position of the `i`-th band center.
    fn position(&self, i: usize) -> f32 {
        let n = self.categories.len().max(1) as f32;
        let step = (self.range_max - self.range_min) / n;
        self.range_min + step * (i as f32 + 0.5)
    }

    /// Position of a category, if known.
    #[must_use]
    pub fn scale(&self, category: &str) -> Option<f32> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| self.position(i))
    }

    /// Output range.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// A trained positional scale.
#[derive(Debug, Clone)]
pub enum PositionScale {
    /// Numeric axis.
    Continuous(ContinuousScale),
    /// Categorical axis.
    Discrete(PointScale),
}

/// An axis tick: render-space position and label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Render-space position along the axis.
    pub position: f32,
    /// Tick label.
    pub label: String,
}

impl PositionScale {
    /// Map a domain value to a render-space position.
    ///
    /// Returns `None` for nulls, text on a continuous scale, unknown
    /// categories and values with no finite image (e.g. `log(0)`).
    #[must_use]
    pub fn map(&self, value: &DataValue) -> Option<f32> {
        match self {
            Self::Continuous(s) => {
                let v = value.as_f32()?;
                let mapped = s.scale(v);
                mapped.is_finite().then_some(mapped)
            }
            Self::Discrete(s) => s.scale(&value.key()?),
        }
    }

    /// Map a raw number (continuous scales only).
    #[must_use]
    pub fn map_number(&self, value: f32) -> Option<f32> {
        match self {
            Self::Continuous(s) => {
                let mapped = s.scale(value);
                mapped.is_finite().then_some(mapped)
            }
            Self::Discrete(_) => None,
        }
    }

    /// Render-space extent covered by this scale.
    #[must_use]
    pub fn extent(&self) -> Extent {
        let (a, b) = match self {
            Self::Continuous(s) => s.range(),
            Self::Discrete(s) => s.range(),
        };
        Extent::new(a, b)
    }

    /// Axis ticks.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        match self {
            Self::Continuous(s) => s
                .ticks(count)
                .into_iter()
                .map(|v| Tick {
                    position: s.scale(v),
                    label: format_tick(v),
                })
                .filter(|t| t.position.is_finite())
                .collect(),
            Self::Discrete(s) => s
                .categories()
                .iter()
                .enumerate()
                .map(|(i, c)| Tick {
                    position: s.position(i),
                    label: c.clone(),
                })
                .collect(),
        }
    }
}

/// Key of a discrete scale entry: a domain value qualified by the series
/// (layer name) it came from.
///
/// Equal values from different series are distinct keys, so two layers
/// sharing a legend do not collide on the same color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScaleKey {
    /// Domain value, rendered as text.
    pub value: String,
    /// Series identifier, if the layer is named.
    pub series: Option<String>,
}

impl ScaleKey {
    /// Create a key.
    #[must_use]
    pub fn new(value: impl Into<String>, series: Option<&str>) -> Self {
        Self {
            value: value.into(),
            series: series.map(str::to_string),
        }
    }

    /// Legend label: the value, followed by the series when present.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.series {
            Some(series) => format!("{} {}", self.value, series),
            None => self.value.clone(),
        }
    }
}

/// Ordinal scale assigning palette entries to keys in first-seen order.
///
/// The palette cycles once exhausted.
#[derive(Debug, Clone)]
pub struct DiscreteScale<R> {
    palette: Vec<R>,
    keys: Vec<ScaleKey>,
    index: HashMap<ScaleKey, usize>,
}

impl<R: Clone> DiscreteScale<R> {
    /// Create an untrained scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty.
    pub fn new(palette: Vec<R>) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::ScaleDomain(
                "Discrete scale requires a non-empty palette".to_string(),
            ));
        }
        Ok(Self {
            palette,
            keys: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Register a key; returns its ordinal.
    pub fn train(&mut self, key: ScaleKey) -> usize {
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.keys.len();
        self.index.insert(key.clone(), i);
        self.keys.push(key);
        i
    }

    /// Look up a trained key.
    #[must_use]
    pub fn get(&self, key: &ScaleKey) -> Option<R> {
        self.index
            .get(key)
            .map(|&i| self.palette[i % self.palette.len()].clone())
    }

    /// Trained keys with their range values, in training order.
    pub fn entries(&self) -> impl Iterator<Item = (&ScaleKey, R)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k, self.palette[i % self.palette.len()].clone()))
    }

    /// Number of trained keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys were trained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl DiscreteScale<Rgba> {
    /// Categorical color scale.
    #[must_use]
    pub fn category10() -> Self {
        Self {
            palette: CATEGORY10.to_vec(),
            keys: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl DiscreteScale<PointShape> {
    /// Shape scale over every marker shape.
    #[must_use]
    pub fn shapes() -> Self {
        Self {
            palette: PointShape::ALL.to_vec(),
            keys: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain(
                "Color scale requires at least one color".to_string(),
            ));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain(
                "Domain min and max cannot be equal".to_string(),
            ));
        }

        Ok(Self {
            colors,
            domain_min: domain.0,
            domain_max: domain.1,
        })
    }

    /// Create a viridis color scale (perceptually uniform).
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty.
    pub fn viridis(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            *self.colors.first().unwrap_or(&Rgba::BLACK),
            *self.colors.last().unwrap_or(&Rgba::WHITE),
        )
    }
}

// ============================================================================
// Domain and tick helpers
// ============================================================================

/// Min/max of the finite values in `data`, using trueno's SIMD reductions.
#[must_use]
pub fn domain_of(data: &[f32]) -> Option<(f32, f32)> {
    let finite: Vec<f32> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let vec = Vector::from_vec(finite);
    let min = vec.min().unwrap_or(f32::NAN);
    let max = vec.max().unwrap_or(f32::NAN);

    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Compute a "nice" number close to `range` (1, 2, 5 times a power of ten).
fn nice_number(range: f32, round: bool) -> f32 {
    let exponent = range.log10().floor();
    let fraction = range / 10f32.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10f32.powf(exponent)
}

/// Nice tick values inside `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f32, max: f32, count: usize) -> Vec<f32> {
    if count < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (count - 1) as f32, true);
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;

    (first..=last).map(|i| i as f32 * spacing).collect()
}

/// Powers of ten inside `[min, max]` (both positive).
#[must_use]
pub fn log_ticks(min: f32, max: f32) -> Vec<f32> {
    if min <= 0.0 || max <= 0.0 {
        return Vec::new();
    }
    let first = (min.log10() - 1e-4).ceil() as i32;
    let last = (max.log10() + 1e-4).floor() as i32;
    (first..=last).map(|e| 10f32.powi(e)).collect()
}

/// Format a tick value without trailing noise.
#[must_use]
pub fn format_tick(value: f32) -> String {
    if value == value.round() && value.abs() < 1e7 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_scale() {
        let scale = LogScale::new((1.0, 1000.0), (0.0, 3.0)).expect("operation should succeed");
        assert!((scale.scale(1.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(10.0) - 1.0).abs() < 0.001);
        assert!((scale.scale(100.0) - 2.0).abs() < 0.001);
        assert!((scale.scale(1000.0) - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_log_scale_non_positive_input_is_nan() {
        let scale = LogScale::new((1.0, 1000.0), (0.0, 3.0)).unwrap();
        assert!(scale.scale(0.0).is_nan());
        assert!(scale.scale(-5.0).is_nan());
    }

    #[test]
    fn test_log_scale_invalid_domain() {
        assert!(LogScale::new((-1.0, 100.0), (0.0, 1.0)).is_err());
        assert!(LogScale::new((0.0, 100.0), (0.0, 1.0)).is_err());
        assert!(LogScale::new((10.0, 10.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_continuous_scale_dispatch() {
        let lin = ContinuousScale::new(Trans::Linear, (0.0, 10.0), (0.0, 100.0)).unwrap();
        assert_eq!(lin.trans(), Trans::Linear);
        assert_relative_eq!(lin.scale(5.0), 50.0);

        let log = ContinuousScale::new(Trans::Log, (1.0, 100.0), (0.0, 2.0)).unwrap();
        assert_eq!(log.trans(), Trans::Log);
        assert_relative_eq!(log.scale(10.0), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_scale_positions() {
        let scale = PointScale::new(vec!["a".into(), "b".into()], (0.0, 100.0));
        assert_eq!(scale.scale("a"), Some(25.0));
        assert_eq!(scale.scale("b"), Some(75.0));
        assert_eq!(scale.scale("c"), None);
    }

    #[test]
    fn test_position_scale_map() {
        let scale = PositionScale::Continuous(
            ContinuousScale::new(Trans::Linear, (0.0, 10.0), (0.0, 100.0)).unwrap(),
        );
        assert_eq!(scale.map(&DataValue::Number(5.0)), Some(50.0));
        assert_eq!(scale.map(&DataValue::Null), None);
        assert_eq!(scale.map(&DataValue::from("5")), None);

        let log = PositionScale::Continuous(
            ContinuousScale::new(Trans::Log, (1.0, 100.0), (0.0, 2.0)).unwrap(),
        );
        assert_eq!(log.map(&DataValue::Number(0.0)), None);
    }

    #[test]
    fn test_position_scale_ticks_discrete() {
        let scale = PositionScale::Discrete(PointScale::new(
            vec!["lo".into(), "hi".into()],
            (0.0, 10.0),
        ));
        let ticks = scale.ticks(5);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].label, "lo");
        assert_eq!(ticks[1].position, 7.5);
    }

    #[test]
    fn test_discrete_scale_first_seen_order() {
        let mut scale = DiscreteScale::category10();
        let a = ScaleKey::new("a", None);
        let b = ScaleKey::new("b", None);
        assert_eq!(scale.train(b.clone()), 0);
        assert_eq!(scale.train(a.clone()), 1);
        assert_eq!(scale.train(b.clone()), 0);
        assert_eq!(scale.get(&b), Some(CATEGORY10[0]));
        assert_eq!(scale.get(&a), Some(CATEGORY10[1]));
        assert_eq!(scale.len(), 2);
    }

    #[test]
    fn test_discrete_scale_series_disambiguates() {
        let mut scale = DiscreteScale::category10();
        let left = ScaleKey::new("a", Some("left"));
        let right = ScaleKey::new("a", Some("right"));
        scale.train(left.clone());
        scale.train(right.clone());
        assert_ne!(scale.get(&left), scale.get(&right));
    }

    #[test]
    fn test_scale_key_separator_in_value_does_not_collide() {
        // "a b" + no series vs "a" + series "b" share a string concatenation
        let joined = ScaleKey::new("a b", None);
        let split = ScaleKey::new("a", Some("b"));
        assert_ne!(joined, split);
        assert_eq!(joined.label(), split.label());
    }

    #[test]
    fn test_discrete_scale_cycles_palette() {
        let mut scale = DiscreteScale::new(vec![1u8, 2u8]).unwrap();
        for v in ["a", "b", "c"] {
            scale.train(ScaleKey::new(v, None));
        }
        assert_eq!(scale.get(&ScaleKey::new("c", None)), Some(1));
        assert_eq!(scale.entries().count(), 3);
    }

    #[test]
    fn test_discrete_scale_empty_palette() {
        assert!(DiscreteScale::<u8>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_discrete_unknown_key() {
        let scale = DiscreteScale::shapes();
        assert!(scale.is_empty());
        assert_eq!(scale.get(&ScaleKey::new("x", None)), None);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
    }

    #[test]
    fn test_color_scale_viridis_ends() {
        let scale = ColorScale::viridis((0.0, 10.0)).unwrap();
        assert_eq!(scale.scale(0.0), Rgba::rgb(68, 1, 84));
        assert_eq!(scale.scale(10.0), Rgba::rgb(253, 231, 37));
        assert!(ColorScale::viridis((1.0, 1.0)).is_err());
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of(&[3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(domain_of(&[f32::NAN, 2.0, f32::INFINITY]), Some((2.0, 2.0)));
        assert_eq!(domain_of(&[]), None);
        assert_eq!(domain_of(&[f32::NAN]), None);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 6), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let ticks = nice_ticks(0.3, 9.7, 5);
        assert!(ticks.iter().all(|t| *t >= 0.3 && *t <= 9.7));
        assert_eq!(nice_ticks(1.0, 1.0, 5), vec![1.0]);
    }

    #[test]
    fn test_log_ticks() {
        assert_eq!(log_ticks(1.0, 1000.0), vec![1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(log_ticks(2.0, 50.0), vec![10.0]);
        assert!(log_ticks(0.0, 10.0).is_empty());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-2.0), "-2");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(0.1), "0.1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_scale_specs_from_json() {
        let specs: ScaleSpecs = serde_json::from_str(
            r#"{"x":{"scaleType":"continuous","trans":"log","min":1},"yRight":{"max":5}}"#,
        )
        .unwrap();
        let x = specs.x.unwrap();
        assert_eq!(x.scale_type, Some(ScaleType::Continuous));
        assert_eq!(x.trans, Trans::Log);
        assert_eq!(x.min, Some(1.0));
        assert_eq!(specs.y_right.unwrap().max, Some(5.0));
        assert!(specs.color.is_none());
    }
}
