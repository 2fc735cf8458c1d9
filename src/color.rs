//! Color types for marker, stroke and legend styling.
//!
//! Colors are plain 8-bit RGBA values. Hex strings (`#rgb`, `#rrggbb`,
//! `#rrggbbaa`) parse through [`std::str::FromStr`], and the categorical
//! palette used by discrete color scales lives in [`CATEGORY10`].

use std::str::FromStr;

use crate::error::Error;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scale the alpha channel by an opacity in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        self.with_alpha((f32::from(self.a) * opacity).round() as u8)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// CSS color string (`rgb(..)` when opaque, `rgba(..)` otherwise).
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Self::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

/// Ten-color categorical palette assigned to discrete color keys in order.
pub const CATEGORY10: [Rgba; 10] = [
    Rgba::rgb(31, 119, 180),
    Rgba::rgb(255, 127, 14),
    Rgba::rgb(44, 160, 44),
    Rgba::rgb(214, 39, 40),
    Rgba::rgb(148, 103, 189),
    Rgba::rgb(140, 86, 75),
    Rgba::rgb(227, 119, 194),
    Rgba::rgb(127, 127, 127),
    Rgba::rgb(188, 189, 34),
    Rgba::rgb(23, 190, 207),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, -0.5), Rgba::BLACK);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 1.5), Rgba::WHITE);
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(Rgba::RED.with_opacity(0.5).a, 128);
        assert_eq!(Rgba::RED.with_opacity(2.0).a, 255);
        assert_eq!(Rgba::RED.with_opacity(-1.0).a, 0);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::RED.to_css(), "rgb(255,0,0)");
        let css = Rgba::new(255, 0, 0, 128).to_css();
        assert!(css.starts_with("rgba("));
        assert!(css.contains("0.502"));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff0000".parse::<Rgba>().unwrap(), Rgba::RED);
        assert_eq!("#0f0".parse::<Rgba>().unwrap(), Rgba::GREEN);
        assert_eq!(
            "#0000ff80".parse::<Rgba>().unwrap(),
            Rgba::new(0, 0, 255, 128)
        );
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!("red".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
        assert!("#".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_category10_distinct() {
        for (i, a) in CATEGORY10.iter().enumerate() {
            for b in &CATEGORY10[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
