//! Aesthetic mappings for Grammar of Graphics.
//!
//! An aesthetic binds a visual property ([`AesName`]) to either a field name
//! or an accessor function over a row (or over a group of rows for
//! group-level properties such as a path's stroke width).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::data::{DataValue, Row};

/// Visual properties an aesthetic can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AesName {
    /// Horizontal position.
    X,
    /// Vertical position on the left axis.
    Y,
    /// Vertical position on the left axis (explicit form of `y`).
    YLeft,
    /// Vertical position on the right axis.
    YRight,
    /// Marker or stroke color.
    Color,
    /// Stroke color of a whole path.
    PathColor,
    /// Marker size or stroke width.
    Size,
    /// Marker shape.
    PointType,
    /// Grouping key splitting data into separate paths.
    Group,
    /// Error magnitude for error bars.
    Error,
    /// Tooltip text attached to a marker.
    HoverText,
    /// Text drawn by the text geom.
    Label,
}

impl AesName {
    /// Vertical aesthetics in resolution order.
    pub const VERTICAL: [AesName; 3] = [AesName::Y, AesName::YLeft, AesName::YRight];

    /// Configuration name of the aesthetic.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AesName::X => "x",
            AesName::Y => "y",
            AesName::YLeft => "yLeft",
            AesName::YRight => "yRight",
            AesName::Color => "color",
            AesName::PathColor => "pathColor",
            AesName::Size => "size",
            AesName::PointType => "pointType",
            AesName::Group => "group",
            AesName::Error => "error",
            AesName::HoverText => "hoverText",
            AesName::Label => "label",
        }
    }
}

impl fmt::Display for AesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessor computing a domain value from one row.
pub type RowFn = Arc<dyn Fn(&Row) -> DataValue + Send + Sync>;

/// Accessor computing a domain value from all rows of a group.
pub type GroupFn = Arc<dyn Fn(&[&Row]) -> DataValue + Send + Sync>;

/// How an aesthetic obtains its domain value.
#[derive(Clone)]
pub enum Aesthetic {
    /// Look the value up by field name.
    Field(String),
    /// Compute the value from a row.
    Accessor(RowFn),
    /// Compute the value from a group of rows.
    GroupAccessor(GroupFn),
}

impl Aesthetic {
    /// Bind to a field name.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Aesthetic::Field(name.into())
    }

    /// Bind to a per-row function.
    #[must_use]
    pub fn accessor<F>(f: F) -> Self
    where
        F: Fn(&Row) -> DataValue + Send + Sync + 'static,
    {
        Aesthetic::Accessor(Arc::new(f))
    }

    /// Bind to a per-group function.
    #[must_use]
    pub fn group_accessor<F>(f: F) -> Self
    where
        F: Fn(&[&Row]) -> DataValue + Send + Sync + 'static,
    {
        Aesthetic::GroupAccessor(Arc::new(f))
    }

    /// Domain value for a single row.
    ///
    /// A group accessor sees the row as a one-row group. Missing fields
    /// resolve to [`DataValue::Null`].
    #[must_use]
    pub fn value(&self, row: &Row) -> DataValue {
        match self {
            Aesthetic::Field(name) => row.get(name).cloned().unwrap_or(DataValue::Null),
            Aesthetic::Accessor(f) => f(row),
            Aesthetic::GroupAccessor(f) => f(&[row]),
        }
    }

    /// Domain value for a group of rows.
    ///
    /// Row-level bindings use the first row of the group.
    #[must_use]
    pub fn group_value(&self, rows: &[&Row]) -> DataValue {
        match self {
            Aesthetic::GroupAccessor(f) => f(rows),
            _ => rows
                .first()
                .map_or(DataValue::Null, |row| self.value(row)),
        }
    }

    /// Whether two bindings read the same underlying value.
    #[must_use]
    pub fn same_binding(&self, other: &Aesthetic) -> bool {
        match (self, other) {
            (Aesthetic::Field(a), Aesthetic::Field(b)) => a == b,
            (Aesthetic::Accessor(a), Aesthetic::Accessor(b)) => Arc::ptr_eq(a, b),
            (Aesthetic::GroupAccessor(a), Aesthetic::GroupAccessor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aesthetic::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Aesthetic::Accessor(_) => f.write_str("Accessor(<fn>)"),
            Aesthetic::GroupAccessor(_) => f.write_str("GroupAccessor(<fn>)"),
        }
    }
}

impl From<&str> for Aesthetic {
    fn from(name: &str) -> Self {
        Aesthetic::Field(name.to_string())
    }
}

impl From<String> for Aesthetic {
    fn from(name: String) -> Self {
        Aesthetic::Field(name)
    }
}

/// Aesthetic mapping specification.
///
/// Maps visual properties to fields or accessors.
#[derive(Debug, Clone, Default)]
pub struct Aes {
    bindings: BTreeMap<AesName, Aesthetic>,
}

impl Aes {
    /// Create a new aesthetic mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind any aesthetic.
    #[must_use]
    pub fn set(mut self, name: AesName, aesthetic: impl Into<Aesthetic>) -> Self {
        self.bindings.insert(name, aesthetic.into());
        self
    }

    /// Map x position.
    #[must_use]
    pub fn x(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::X, aesthetic)
    }

    /// Map y position (left axis).
    #[must_use]
    pub fn y(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Y, aesthetic)
    }

    /// Map y position on the left axis.
    #[must_use]
    pub fn y_left(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::YLeft, aesthetic)
    }

    /// Map y position on the right axis.
    #[must_use]
    pub fn y_right(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::YRight, aesthetic)
    }

    /// Map color.
    #[must_use]
    pub fn color(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Color, aesthetic)
    }

    /// Map path stroke color.
    #[must_use]
    pub fn path_color(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::PathColor, aesthetic)
    }

    /// Map size.
    #[must_use]
    pub fn size(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Size, aesthetic)
    }

    /// Map marker shape.
    #[must_use]
    pub fn point_type(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::PointType, aesthetic)
    }

    /// Map group.
    #[must_use]
    pub fn group(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Group, aesthetic)
    }

    /// Map error magnitude.
    #[must_use]
    pub fn error(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Error, aesthetic)
    }

    /// Map hover text.
    #[must_use]
    pub fn hover_text(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::HoverText, aesthetic)
    }

    /// Map label text.
    #[must_use]
    pub fn label(self, aesthetic: impl Into<Aesthetic>) -> Self {
        self.set(AesName::Label, aesthetic)
    }

    /// Look up a binding.
    #[must_use]
    pub fn get(&self, name: AesName) -> Option<&Aesthetic> {
        self.bindings.get(&name)
    }

    /// Whether a binding exists.
    #[must_use]
    pub fn contains(&self, name: AesName) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Bound aesthetic names.
    pub fn names(&self) -> impl Iterator<Item = AesName> + '_ {
        self.bindings.keys().copied()
    }

    /// Merge another Aes, with other taking precedence.
    ///
    /// The vertical bindings (`y`, `yLeft`, `yRight`) are replaced as a
    /// family: when `other` binds any of them, none of ours survive.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        let mut bindings = self.bindings.clone();
        if AesName::VERTICAL.iter().any(|name| other.contains(*name)) {
            bindings.retain(|name, _| !AesName::VERTICAL.contains(name));
        }
        for (name, aesthetic) in &other.bindings {
            bindings.insert(*name, aesthetic.clone());
        }
        Aes { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new().with("x", 1.0).with("y", 2.0).with("g", "a")
    }

    #[test]
    fn test_aes_builder() {
        let aes = Aes::new().x("xvar").y("yvar").color("category");

        assert!(matches!(aes.get(AesName::X), Some(Aesthetic::Field(f)) if f == "xvar"));
        assert!(matches!(aes.get(AesName::Y), Some(Aesthetic::Field(f)) if f == "yvar"));
        assert!(aes.contains(AesName::Color));
        assert!(!aes.contains(AesName::Size));
    }

    #[test]
    fn test_aes_merge_other_wins() {
        let base = Aes::new().x("x").y("y").color("c");
        let layer = Aes::new().y("y2").size("s");

        let merged = base.merge(&layer);
        assert!(matches!(merged.get(AesName::X), Some(Aesthetic::Field(f)) if f == "x"));
        assert!(matches!(merged.get(AesName::Y), Some(Aesthetic::Field(f)) if f == "y2"));
        assert!(merged.contains(AesName::Color));
        assert!(merged.contains(AesName::Size));
        assert_eq!(merged.names().count(), 4);
    }

    #[test]
    fn test_merge_replaces_vertical_family() {
        let base = Aes::new().x("x").y("y").color("g");
        let merged = base.merge(&Aes::new().y_right("r"));

        assert!(!merged.contains(AesName::Y));
        assert!(matches!(merged.get(AesName::YRight), Some(Aesthetic::Field(f)) if f == "r"));
        assert!(merged.contains(AesName::X));
        assert!(merged.contains(AesName::Color));

        let kept = base.merge(&Aes::new().color("h"));
        assert!(kept.contains(AesName::Y));
    }

    #[test]
    fn test_field_value() {
        let a = Aesthetic::field("x");
        assert_eq!(a.value(&row()), DataValue::Number(1.0));
        assert_eq!(Aesthetic::field("nope").value(&row()), DataValue::Null);
    }

    #[test]
    fn test_accessor_value() {
        let a = Aesthetic::accessor(|r| DataValue::from(r.get_f32("y").unwrap_or(0.0) * 10.0));
        assert_eq!(a.value(&row()), DataValue::Number(20.0));
    }

    #[test]
    fn test_group_value() {
        let r1 = Row::new().with("v", 1.0);
        let r2 = Row::new().with("v", 3.0);
        let rows = [&r1, &r2];

        let count = Aesthetic::group_accessor(|rows| DataValue::from(rows.len() as f32));
        assert_eq!(count.group_value(&rows), DataValue::Number(2.0));
        assert_eq!(count.value(&r1), DataValue::Number(1.0));

        let field = Aesthetic::field("v");
        assert_eq!(field.group_value(&rows), DataValue::Number(1.0));
        assert_eq!(field.group_value(&[]), DataValue::Null);
    }

    #[test]
    fn test_same_binding() {
        let f = Aesthetic::accessor(|_| DataValue::Null);
        assert!(f.same_binding(&f.clone()));
        assert!(!f.same_binding(&Aesthetic::accessor(|_| DataValue::Null)));
        assert!(Aesthetic::field("g").same_binding(&"g".into()));
        assert!(!Aesthetic::field("g").same_binding(&f));
    }

    #[test]
    fn test_aesthetic_debug() {
        assert_eq!(format!("{:?}", Aesthetic::field("x")), "Field(\"x\")");
        assert_eq!(
            format!("{:?}", Aesthetic::accessor(|_| DataValue::Null)),
            "Accessor(<fn>)"
        );
    }

    #[test]
    fn test_aes_name_display() {
        assert_eq!(AesName::YRight.to_string(), "yRight");
        assert_eq!(AesName::PointType.to_string(), "pointType");
        assert_eq!(AesName::HoverText.as_str(), "hoverText");
    }
}
