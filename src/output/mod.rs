//! Output encoders.

mod svg;

pub use svg::{SvgElement, SvgEncoder};
