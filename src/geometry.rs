//! Render-space geometry shared by geoms and drawing surfaces.

/// A 2D point in render space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point in chart orientation: `y` grows upward, so it is negated for
    /// screen space where `y` grows downward.
    #[must_use]
    pub fn chart(x: f32, y: f32) -> Self {
        Self::new(x, -y)
    }

    /// Translate by an offset.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A closed numeric interval, stored with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Extent {
    /// Create an extent from two bounds in any order.
    #[must_use]
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Clamp a value into the extent. NaN clamps to `min`.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Whether the value lies inside the extent (inclusive).
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Length of the interval.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_point_inverts_y() {
        let p = Point::chart(1.0, 2.0);
        assert_eq!(p, Point::new(1.0, -2.0));
    }

    #[test]
    fn test_offset() {
        let p = Point::new(1.0, 1.0).offset(2.0, -3.0);
        assert_eq!(p, Point::new(3.0, -2.0));
    }

    #[test]
    fn test_extent_orders_bounds() {
        let e = Extent::new(100.0, -100.0);
        assert_eq!(e.min, -100.0);
        assert_eq!(e.max, 100.0);
        assert_eq!(e.span(), 200.0);
    }

    #[test]
    fn test_extent_clamp() {
        let e = Extent::new(-100.0, 100.0);
        assert_eq!(e.clamp(1010.0), 100.0);
        assert_eq!(e.clamp(-990.0), -100.0);
        assert_eq!(e.clamp(13.0), 13.0);
        assert_eq!(e.clamp(f32::NAN), -100.0);
        assert_eq!(e.clamp(f32::NEG_INFINITY), -100.0);
    }

    #[test]
    fn test_extent_contains() {
        let e = Extent::new(0.0, 1.0);
        assert!(e.contains(0.0));
        assert!(e.contains(1.0));
        assert!(!e.contains(1.5));
    }
}
