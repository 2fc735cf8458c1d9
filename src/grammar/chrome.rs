//! Non-data drawing: panel, grid, axes, titles and legend.
//!
//! Chrome is drawn in surface coordinates, outside any layer group.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::grammar::geom::PointShape;
use crate::render::{Canvas, Primitive, TextAnchor};
use crate::scale::{PositionScale, Tick};

use super::plot::Labels;
use super::theme::Theme;
use super::train::TrainedScales;

const TICK_LENGTH: f32 = 5.0;
const LEGEND_ROW_HEIGHT: f32 = 18.0;
const LEGEND_SWATCH_SIZE: f32 = 5.0;

/// Placement of the plotting grid on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Bottom-left corner: the origin of every layer group.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.bottom())
    }
}

fn line(canvas: &mut dyn Canvas, from: Point, to: Point, stroke: Rgba, width: f32) {
    canvas.draw(Primitive::Line {
        from,
        to,
        stroke,
        width,
    });
}

fn text(
    canvas: &mut dyn Canvas,
    at: Point,
    content: &str,
    size: f32,
    fill: Rgba,
    anchor: TextAnchor,
    rotate: f32,
) {
    canvas.draw(Primitive::Text {
        at,
        text: content.to_string(),
        size,
        fill,
        anchor,
        rotate,
    });
}

/// Panel background and grid lines, drawn beneath the layers.
pub(crate) fn draw_panel(
    canvas: &mut dyn Canvas,
    frame: &Frame,
    theme: &Theme,
    scales: &TrainedScales,
) {
    canvas.draw(Primitive::Rect {
        origin: Point::new(frame.left, frame.top),
        width: frame.width,
        height: frame.height,
        fill: theme.panel_background,
        stroke: theme.show_panel_border.then_some(theme.axis_color),
    });

    if !theme.show_grid {
        return;
    }
    for tick in scales.x.ticks(theme.tick_count) {
        let x = frame.left + tick.position;
        line(
            canvas,
            Point::new(x, frame.top),
            Point::new(x, frame.bottom()),
            theme.grid_color,
            theme.grid_width,
        );
    }
    for tick in scales.y_left.ticks(theme.tick_count) {
        let y = frame.bottom() - tick.position;
        line(
            canvas,
            Point::new(frame.left, y),
            Point::new(frame.right(), y),
            theme.grid_color,
            theme.grid_width,
        );
    }
}

fn visible(ticks: Vec<Tick>, scale: &PositionScale) -> impl Iterator<Item = Tick> {
    let extent = scale.extent();
    ticks.into_iter().filter(move |t| extent.contains(t.position))
}

/// Axes with ticks and tick labels.
pub(crate) fn draw_axes(
    canvas: &mut dyn Canvas,
    frame: &Frame,
    theme: &Theme,
    scales: &TrainedScales,
) {
    if !theme.show_axis {
        return;
    }
    let (color, width, size) = (theme.axis_color, theme.axis_width, theme.font_size);

    // x axis
    line(
        canvas,
        frame.origin(),
        Point::new(frame.right(), frame.bottom()),
        color,
        width,
    );
    for tick in visible(scales.x.ticks(theme.tick_count), &scales.x) {
        let x = frame.left + tick.position;
        line(
            canvas,
            Point::new(x, frame.bottom()),
            Point::new(x, frame.bottom() + TICK_LENGTH),
            color,
            width,
        );
        text(
            canvas,
            Point::new(x, frame.bottom() + TICK_LENGTH + size),
            &tick.label,
            size,
            theme.text_color,
            TextAnchor::Middle,
            0.0,
        );
    }

    // left axis
    line(
        canvas,
        Point::new(frame.left, frame.top),
        frame.origin(),
        color,
        width,
    );
    for tick in visible(scales.y_left.ticks(theme.tick_count), &scales.y_left) {
        let y = frame.bottom() - tick.position;
        line(
            canvas,
            Point::new(frame.left - TICK_LENGTH, y),
            Point::new(frame.left, y),
            color,
            width,
        );
        text(
            canvas,
            Point::new(frame.left - TICK_LENGTH - 2.0, y + size / 3.0),
            &tick.label,
            size,
            theme.text_color,
            TextAnchor::End,
            0.0,
        );
    }

    // right axis
    let Some(right) = &scales.y_right else {
        return;
    };
    line(
        canvas,
        Point::new(frame.right(), frame.top),
        Point::new(frame.right(), frame.bottom()),
        color,
        width,
    );
    for tick in visible(right.ticks(theme.tick_count), right) {
        let y = frame.bottom() - tick.position;
        line(
            canvas,
            Point::new(frame.right(), y),
            Point::new(frame.right() + TICK_LENGTH, y),
            color,
            width,
        );
        text(
            canvas,
            Point::new(frame.right() + TICK_LENGTH + 2.0, y + size / 3.0),
            &tick.label,
            size,
            theme.text_color,
            TextAnchor::Start,
            0.0,
        );
    }
}

/// Main title and axis labels.
pub(crate) fn draw_labels(
    canvas: &mut dyn Canvas,
    frame: &Frame,
    theme: &Theme,
    labels: &Labels,
    surface: (f32, f32),
) {
    let (width, height) = surface;
    let mid_x = frame.left + frame.width / 2.0;
    let mid_y = frame.top + frame.height / 2.0;

    if let Some(main) = &labels.main {
        text(
            canvas,
            Point::new(width / 2.0, (frame.top + theme.title_size) / 2.0),
            main,
            theme.title_size,
            theme.text_color,
            TextAnchor::Middle,
            0.0,
        );
    }
    if let Some(x) = &labels.x {
        text(
            canvas,
            Point::new(mid_x, height - theme.font_size / 2.0),
            x,
            theme.font_size + 1.0,
            theme.text_color,
            TextAnchor::Middle,
            0.0,
        );
    }
    if let Some(y) = &labels.y {
        text(
            canvas,
            Point::new(theme.font_size + 2.0, mid_y),
            y,
            theme.font_size + 1.0,
            theme.text_color,
            TextAnchor::Middle,
            -90.0,
        );
    }
    if let Some(y_right) = &labels.y_right {
        text(
            canvas,
            Point::new(frame.right() + theme.margins.right - theme.font_size / 2.0, mid_y),
            y_right,
            theme.font_size + 1.0,
            theme.text_color,
            TextAnchor::Middle,
            90.0,
        );
    }
}

/// Discrete color legend to the right of the grid.
pub(crate) fn draw_legend(
    canvas: &mut dyn Canvas,
    frame: &Frame,
    theme: &Theme,
    entries: &[(String, Rgba)],
) {
    let x = frame.right() + theme.margins.right + 10.0;
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = frame.top + LEGEND_ROW_HEIGHT * (i as f32 + 0.5);
        canvas.draw(Primitive::Rect {
            origin: Point::new(x, y - LEGEND_SWATCH_SIZE),
            width: LEGEND_SWATCH_SIZE * 2.0,
            height: LEGEND_SWATCH_SIZE * 2.0,
            fill: *color,
            stroke: None,
        });
        text(
            canvas,
            Point::new(x + LEGEND_SWATCH_SIZE * 2.0 + 6.0, y + theme.font_size / 3.0),
            label,
            theme.font_size,
            theme.text_color,
            TextAnchor::Start,
            0.0,
        );
    }
}
