//! Drawing-surface abstraction.
//!
//! Geoms and plot chrome emit [`Primitive`] draw commands into a [`Canvas`].
//! Surfaces decide how to realize them: [`crate::output::SvgEncoder`] writes
//! SVG elements, [`DrawList`] records them for inspection.
//!
//! Layers draw inside a group whose origin is the bottom-left corner of the
//! plotting grid, so geom coordinates are chart coordinates with `y` negated.

mod primitives;

pub use primitives::{Canvas, DrawGroup, DrawList, Primitive, TextAnchor};
