//! SVG output encoder.
//!
//! [`SvgEncoder`] is a [`Canvas`]: plots draw into it and [`SvgEncoder::render`]
//! serializes the result. Layer groups become `<g>` elements translated to the
//! grid origin, so marker and path coordinates stay in render space.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Point;
use crate::grammar::PointShape;
use crate::render::{Canvas, Primitive, TextAnchor};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Stroke width used for line-only marker shapes.
const MARKER_STROKE_WIDTH: f32 = 1.5;

/// SVG encoder and drawing surface.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Top-level SVG elements
    elements: Vec<SvgElement>,
    /// Group currently receiving elements
    open_group: Option<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<Rgba>,
        stroke: Rgba,
        title: Option<String>,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Polyline (connected line segments)
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
        title: Option<String>,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
    /// Translated group
    Group {
        class: String,
        x: f32,
        y: f32,
        children: Vec<SvgElement>,
    },
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
            open_group: None,
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a raw element to the open group, or the root.
    pub fn add_element(&mut self, element: SvgElement) {
        match &mut self.open_group {
            Some(SvgElement::Group { children, .. }) => children.push(element),
            _ => self.elements.push(element),
        }
    }

    /// Top-level elements (an open group is not included until closed).
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in self.elements.iter().chain(self.open_group.iter()) {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl Canvas for SvgEncoder {
    fn clear(&mut self, width: u32, height: u32, background: Option<Rgba>) {
        self.width = width;
        self.height = height;
        self.background = background;
        self.elements.clear();
        self.open_group = None;
    }

    fn begin_group(&mut self, class: &str, origin: Point) {
        self.end_group();
        self.open_group = Some(SvgElement::Group {
            class: class.to_string(),
            x: origin.x,
            y: origin.y,
            children: Vec::new(),
        });
    }

    fn end_group(&mut self) {
        if let Some(group) = self.open_group.take() {
            self.elements.push(group);
        }
    }

    fn draw(&mut self, primitive: Primitive) {
        let element = primitive_to_element(primitive);
        self.add_element(element);
    }
}

/// Convert a draw command to an SVG element.
fn primitive_to_element(primitive: Primitive) -> SvgElement {
    match primitive {
        Primitive::Marker {
            center,
            shape: PointShape::Circle,
            size,
            fill,
            stroke,
            title,
        } => SvgElement::Circle {
            cx: center.x,
            cy: center.y,
            r: size,
            fill,
            stroke,
            title,
        },
        Primitive::Marker {
            center,
            shape,
            size,
            fill,
            stroke,
            title,
        } => {
            let line_only = matches!(shape, PointShape::Cross | PointShape::X);
            SvgElement::Path {
                d: marker_path(shape, center, size),
                fill: if line_only { None } else { fill },
                stroke: Some(stroke),
                stroke_width: if line_only { MARKER_STROKE_WIDTH } else { 1.0 },
                title,
            }
        }
        Primitive::Polyline {
            points,
            stroke,
            width,
        } => SvgElement::Polyline {
            points: points.iter().map(|p| (p.x, p.y)).collect(),
            stroke,
            stroke_width: width,
        },
        Primitive::Line {
            from,
            to,
            stroke,
            width,
        } => SvgElement::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke,
            stroke_width: width,
        },
        Primitive::Rect {
            origin,
            width,
            height,
            fill,
            stroke,
        } => SvgElement::Rect {
            x: origin.x,
            y: origin.y,
            width,
            height,
            fill,
            stroke,
        },
        Primitive::Text {
            at,
            text,
            size,
            fill,
            anchor,
            rotate,
        } => SvgElement::Text {
            x: at.x,
            y: at.y,
            text,
            font_size: size,
            fill,
            anchor,
            rotate,
        },
    }
}

/// SVG path data for a non-circular marker of half-extent `r`.
fn marker_path(shape: PointShape, c: Point, r: f32) -> String {
    let (x, y) = (c.x, c.y);
    match shape {
        PointShape::Circle | PointShape::Square => format!(
            "M{} {}H{}V{}H{}Z",
            x - r,
            y - r,
            x + r,
            y + r,
            x - r
        ),
        PointShape::Triangle => format!(
            "M{} {}L{} {}L{} {}Z",
            x,
            y - r,
            x + r,
            y + r,
            x - r,
            y + r
        ),
        PointShape::Diamond => format!(
            "M{} {}L{} {}L{} {}L{} {}Z",
            x,
            y - r,
            x + r,
            y,
            x,
            y + r,
            x - r,
            y
        ),
        PointShape::Cross => format!(
            "M{} {}H{}M{} {}V{}",
            x - r,
            y,
            x + r,
            x,
            y - r,
            y + r
        ),
        PointShape::X => format!(
            "M{} {}L{} {}M{} {}L{} {}",
            x - r,
            y - r,
            x + r,
            y + r,
            x - r,
            y + r,
            x + r,
            y - r
        ),
    }
}

/// Escape XML special characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fill_attr(fill: Option<Rgba>) -> String {
    fill.map(|f| f.to_css())
        .unwrap_or_else(|| "none".to_string())
}

fn title_child(title: &Option<String>) -> Option<String> {
    title
        .as_ref()
        .map(|t| format!("<title>{}</title>", escape_xml(t)))
}

/// Write an element (and its children) at the given indent depth.
fn write_element(svg: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Group {
            class,
            x,
            y,
            children,
        } => {
            let _ = writeln!(
                svg,
                r#"{indent}<g class="{}" transform="translate({x},{y})">"#,
                escape_xml(class)
            );
            for child in children {
                write_element(svg, child, depth + 1);
            }
            let _ = writeln!(svg, "{indent}</g>");
        }
        other => {
            let _ = writeln!(svg, "{indent}{}", element_to_svg(other));
        }
    }
}

/// Convert a leaf SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}""#, s.to_css()))
                .unwrap_or_default();
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}/>"#,
                fill.to_css()
            )
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            title,
        } => {
            let open = format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" stroke="{}""#,
                fill_attr(*fill),
                stroke.to_css()
            );
            match title_child(title) {
                Some(t) => format!("{open}>{t}</circle>"),
                None => format!("{open}/>"),
            }
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points_str: String = points
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            )
        }
        SvgElement::Path {
            d,
            fill,
            stroke,
            stroke_width,
            title,
        } => {
            let stroke_attr = stroke
                .map(|s| {
                    format!(
                        r#" stroke="{}" stroke-width="{}""#,
                        s.to_css(),
                        stroke_width
                    )
                })
                .unwrap_or_default();
            let open = format!(r#"<path d="{d}" fill="{}"{stroke_attr}"#, fill_attr(*fill));
            match title_child(title) {
                Some(t) => format!("{open}>{t}</path>"),
                None => format!("{open}/>"),
            }
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if *rotate == 0.0 {
                String::new()
            } else {
                format!(r#" transform="rotate({rotate},{x},{y})""#)
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                escape_xml(text)
            )
        }
        SvgElement::Group { .. } => String::new(),
    }
}
