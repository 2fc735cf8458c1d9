//! Draw commands and the recording canvas.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::grammar::PointShape;

/// Text anchor position for text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A data marker.
    Marker {
        /// Marker center.
        center: Point,
        /// Marker shape.
        shape: PointShape,
        /// Marker size (radius for circles, half-extent for other shapes).
        size: f32,
        /// Fill color; `None` draws a hollow marker.
        fill: Option<Rgba>,
        /// Outline color.
        stroke: Rgba,
        /// Tooltip text.
        title: Option<String>,
    },
    /// Connected straight segments through `points`.
    Polyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Stroke color.
        stroke: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// A single line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        stroke: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        origin: Point,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        fill: Rgba,
        /// Outline color.
        stroke: Option<Rgba>,
    },
    /// A text run.
    Text {
        /// Anchor point.
        at: Point,
        /// Content.
        text: String,
        /// Font size.
        size: f32,
        /// Fill color.
        fill: Rgba,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Rotation in degrees around `at`.
        rotate: f32,
    },
}

impl Primitive {
    /// Whether this is a data marker.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Primitive::Marker { .. })
    }

    /// Whether this is a polyline.
    #[must_use]
    pub fn is_polyline(&self) -> bool {
        matches!(self, Primitive::Polyline { .. })
    }
}

/// A drawing surface.
pub trait Canvas {
    /// Discard everything drawn so far and size the surface.
    fn clear(&mut self, width: u32, height: u32, background: Option<Rgba>);

    /// Open a group translated to `origin`. Groups do not nest.
    fn begin_group(&mut self, class: &str, origin: Point);

    /// Close the open group.
    fn end_group(&mut self);

    /// Draw a primitive into the open group, or the root when none is open.
    fn draw(&mut self, primitive: Primitive);
}

/// Primitives drawn inside one group.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGroup {
    /// Group class name.
    pub class: String,
    /// Group origin on the surface.
    pub origin: Point,
    /// Primitives in group-local coordinates.
    pub primitives: Vec<Primitive>,
}

/// Canvas that records draw commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    root: Vec<Primitive>,
    groups: Vec<DrawGroup>,
    open: Option<usize>,
}

impl DrawList {
    /// Create an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size set by the last `clear`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Background set by the last `clear`.
    #[must_use]
    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    /// Primitives drawn outside any group.
    #[must_use]
    pub fn root(&self) -> &[Primitive] {
        &self.root
    }

    /// Groups in drawing order.
    #[must_use]
    pub fn groups(&self) -> &[DrawGroup] {
        &self.groups
    }

    /// First group with the given class.
    #[must_use]
    pub fn group(&self, class: &str) -> Option<&DrawGroup> {
        self.groups.iter().find(|g| g.class == class)
    }

    /// Every primitive, root first, then groups in order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.root
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.primitives.iter()))
    }

    /// Number of data markers across all groups.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.primitives().filter(|p| p.is_marker()).count()
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, width: u32, height: u32, background: Option<Rgba>) {
        *self = Self {
            width,
            height,
            background,
            ..Self::default()
        };
    }

    fn begin_group(&mut self, class: &str, origin: Point) {
        self.groups.push(DrawGroup {
            class: class.to_string(),
            origin,
            primitives: Vec::new(),
        });
        self.open = Some(self.groups.len() - 1);
    }

    fn end_group(&mut self) {
        self.open = None;
    }

    fn draw(&mut self, primitive: Primitive) {
        match self.open.and_then(|i| self.groups.get_mut(i)) {
            Some(group) => group.primitives.push(primitive),
            None => self.root.push(primitive),
        }
    }
}
