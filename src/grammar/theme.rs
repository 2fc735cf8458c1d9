//! Theme system for Grammar of Graphics.
//!
//! Controls the non-data appearance of plots: panel, grid, axes, text and
//! the space reserved around the plotting grid.

use crate::color::Rgba;

/// Space between the surface edge and the plotting grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Above the grid (title).
    pub top: f32,
    /// Right of the grid (right axis, legend).
    pub right: f32,
    /// Below the grid (x axis and label).
    pub bottom: f32,
    /// Left of the grid (y axis and label).
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    #[must_use]
    pub const fn uniform(m: f32) -> Self {
        Self {
            top: m,
            right: m,
            bottom: m,
            left: m,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 50.0,
            left: 60.0,
        }
    }
}

/// Theme specification.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color.
    pub background: Rgba,
    /// Panel background color.
    pub panel_background: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Axis line color.
    pub axis_color: Rgba,
    /// Text color.
    pub text_color: Rgba,
    /// Show grid lines.
    pub show_grid: bool,
    /// Show axis lines, ticks and tick labels.
    pub show_axis: bool,
    /// Show panel border.
    pub show_panel_border: bool,
    /// Grid line width.
    pub grid_width: f32,
    /// Axis line width.
    pub axis_width: f32,
    /// Tick label and legend font size.
    pub font_size: f32,
    /// Title font size.
    pub title_size: f32,
    /// Requested number of ticks on continuous axes.
    pub tick_count: usize,
    /// Space around the grid.
    pub margins: Margins,
    /// Extra right margin reserved when a legend is drawn.
    pub legend_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Grey theme (ggplot2 default-like).
    #[must_use]
    pub fn grey() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::rgb(235, 235, 235),
            grid_color: Rgba::WHITE,
            axis_color: Rgba::rgb(50, 50, 50),
            text_color: Rgba::rgb(50, 50, 50),
            show_grid: true,
            show_axis: true,
            show_panel_border: false,
            grid_width: 1.0,
            axis_width: 1.0,
            font_size: 11.0,
            title_size: 16.0,
            tick_count: 5,
            margins: Margins::default(),
            legend_width: 120.0,
        }
    }

    /// Minimal theme with white background.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(220, 220, 220),
            axis_color: Rgba::rgb(100, 100, 100),
            text_color: Rgba::BLACK,
            grid_width: 0.5,
            axis_width: 0.5,
            ..Self::grey()
        }
    }

    /// Black and white theme.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            panel_background: Rgba::WHITE,
            grid_color: Rgba::rgb(200, 200, 200),
            axis_color: Rgba::BLACK,
            text_color: Rgba::BLACK,
            show_panel_border: true,
            grid_width: 0.5,
            ..Self::grey()
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 30),
            panel_background: Rgba::rgb(40, 40, 40),
            grid_color: Rgba::rgb(60, 60, 60),
            axis_color: Rgba::rgb(180, 180, 180),
            text_color: Rgba::rgb(220, 220, 220),
            grid_width: 0.5,
            axis_width: 0.5,
            ..Self::grey()
        }
    }

    /// Set background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set margins.
    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Enable or disable grid lines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Enable or disable axes.
    #[must_use]
    pub fn axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }
}
