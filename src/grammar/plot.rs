//! Plot: layers composed over shared scales.

use std::path::Path;

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::output::SvgEncoder;
use crate::render::Canvas;
use crate::scale::ScaleSpecs;

use super::aes::Aes;
use super::chrome::{self, Frame};
use super::data::Row;
use super::geom::LayerContext;
use super::layer::Layer;
use super::theme::Theme;
use super::train::ScaleTrainer;

/// Axis and chart titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Labels {
    /// Chart title.
    pub main: Option<String>,
    /// Horizontal axis label.
    pub x: Option<String>,
    /// Left axis label.
    pub y: Option<String>,
    /// Right axis label.
    pub y_right: Option<String>,
}

/// What happened to one layer during a render.
#[derive(Debug)]
pub enum LayerStatus {
    /// The layer drew this many primitives.
    Drawn {
        /// Primitives emitted.
        primitives: usize,
    },
    /// The layer failed and drew nothing.
    Failed(Error),
}

/// Render outcome of one layer.
#[derive(Debug)]
pub struct LayerReport {
    /// Position in the plot's layer list.
    pub index: usize,
    /// Layer name.
    pub name: Option<String>,
    /// Geom name.
    pub geom: &'static str,
    /// Outcome.
    pub status: LayerStatus,
}

/// Per-layer outcomes of [`Plot::render`].
#[derive(Debug, Default)]
pub struct RenderReport {
    layers: Vec<LayerReport>,
}

impl RenderReport {
    /// Outcomes in layer order.
    #[must_use]
    pub fn layers(&self) -> &[LayerReport] {
        &self.layers
    }

    /// Layers that failed.
    pub fn failures(&self) -> impl Iterator<Item = &LayerReport> + '_ {
        self.layers
            .iter()
            .filter(|l| matches!(l.status, LayerStatus::Failed(_)))
    }

    /// Whether every layer rendered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Primitives drawn across all layers.
    #[must_use]
    pub fn primitives(&self) -> usize {
        self.layers
            .iter()
            .map(|l| match l.status {
                LayerStatus::Drawn { primitives } => primitives,
                LayerStatus::Failed(_) => 0,
            })
            .sum()
    }
}

/// A layered chart.
///
/// Rendering trains every scale from all layers first, then draws the
/// chrome and each layer in order (later layers on top). A layer whose geom
/// cannot resolve its aesthetics is logged, reported and skipped; the other
/// layers still render.
#[derive(Debug)]
pub struct Plot {
    width: u32,
    height: u32,
    labels: Labels,
    data: Vec<Row>,
    aes: Aes,
    scales: ScaleSpecs,
    theme: Theme,
    legend: bool,
    layers: Vec<Layer>,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl Plot {
    /// Create an empty 800x600 plot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
            labels: Labels::default(),
            data: Vec::new(),
            aes: Aes::new(),
            scales: ScaleSpecs::default(),
            theme: Theme::default(),
            legend: true,
            layers: Vec::new(),
        }
    }

    /// Set all labels.
    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the chart title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.labels.main = Some(title.into());
        self
    }

    /// Set the x axis label.
    #[must_use]
    pub fn xlab(mut self, label: impl Into<String>) -> Self {
        self.labels.x = Some(label.into());
        self
    }

    /// Set the left axis label.
    #[must_use]
    pub fn ylab(mut self, label: impl Into<String>) -> Self {
        self.labels.y = Some(label.into());
        self
    }

    /// Set the right axis label.
    #[must_use]
    pub fn ylab_right(mut self, label: impl Into<String>) -> Self {
        self.labels.y_right = Some(label.into());
        self
    }

    /// Set the default data.
    #[must_use]
    pub fn data(mut self, data: Vec<Row>) -> Self {
        self.data = data;
        self
    }

    /// Set the default aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// Set scale configuration.
    #[must_use]
    pub fn scales(mut self, scales: ScaleSpecs) -> Self {
        self.scales = scales;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Show or hide the color legend.
    #[must_use]
    pub fn legend(mut self, show: bool) -> Self {
        self.legend = show;
        self
    }

    /// Add a layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append a layer; it takes part in the next render.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Layers in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn layer_context<'a>(&'a self, layer: &'a Layer, aes: &'a Aes) -> LayerContext<'a> {
        LayerContext {
            data: layer.layer_data().unwrap_or(&self.data),
            aes,
            series: layer.layer_name(),
        }
    }

    /// Render the whole plot onto `canvas`, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or an invalid configured scale
    /// domain. Layer failures are reported in the [`RenderReport`] instead.
    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<RenderReport> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let merged: Vec<Aes> = self
            .layers
            .iter()
            .map(|layer| self.aes.merge(layer.layer_aes()))
            .collect();

        let mut trainer = ScaleTrainer::new();
        let mut trained: Vec<Result<()>> = Vec::with_capacity(self.layers.len());
        for (layer, aes) in self.layers.iter().zip(&merged) {
            let ctx = self.layer_context(layer, aes);
            trained.push(layer.geom().train(&ctx, &mut trainer));
        }

        let margins = self.theme.margins;
        let legend_width = if self.legend && trainer.has_discrete_color(&self.scales) {
            self.theme.legend_width
        } else {
            0.0
        };
        let (width, height) = (self.width as f32, self.height as f32);
        let frame = Frame {
            left: margins.left,
            top: margins.top,
            width: (width - margins.left - margins.right - legend_width).max(1.0),
            height: (height - margins.top - margins.bottom).max(1.0),
        };
        let scales = trainer.finish(&self.scales, frame.width, frame.height)?;

        canvas.clear(self.width, self.height, Some(self.theme.background));
        chrome::draw_panel(canvas, &frame, &self.theme, &scales);

        let mut report = RenderReport::default();
        for (index, ((layer, aes), training)) in
            self.layers.iter().zip(&merged).zip(trained).enumerate()
        {
            let geom = layer.geom();
            let result = training.and_then(|()| {
                let ctx = self.layer_context(layer, aes);
                canvas.begin_group(&format!("layer-{index}"), frame.origin());
                let drawn = geom.render(&ctx, &scales, canvas);
                canvas.end_group();
                drawn
            });

            let status = match result {
                Ok(primitives) => {
                    debug!(
                        layer = index,
                        name = ?layer.layer_name(),
                        geom = geom.name(),
                        primitives,
                        "layer rendered"
                    );
                    LayerStatus::Drawn { primitives }
                }
                Err(e) => {
                    error!(
                        layer = index,
                        name = ?layer.layer_name(),
                        geom = geom.name(),
                        error = %e,
                        "layer failed to render"
                    );
                    LayerStatus::Failed(e)
                }
            };
            report.layers.push(LayerReport {
                index,
                name: layer.layer_name().map(str::to_string),
                geom: geom.name(),
                status,
            });
        }

        chrome::draw_axes(canvas, &frame, &self.theme, &scales);
        chrome::draw_labels(canvas, &frame, &self.theme, &self.labels, (width, height));
        if legend_width > 0.0 {
            chrome::draw_legend(canvas, &frame, &self.theme, &scales.legend());
        }

        Ok(report)
    }

    /// Render to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_svg(&self) -> Result<String> {
        let mut svg = SvgEncoder::new(self.width, self.height);
        self.render(&mut svg)?;
        Ok(svg.render())
    }

    /// Render to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or file writing fails.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<RenderReport> {
        let mut svg = SvgEncoder::new(self.width, self.height);
        let report = self.render(&mut svg)?;
        svg.write_to_file(path)?;
        Ok(report)
    }
}

impl batuta_common::display::WithDimensions for Plot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
