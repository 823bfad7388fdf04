use std::fmt;

pub use kurbo::{Affine, Rect, Size, Vec2};

/// Normalized position within a scroll range, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Range start.
    pub const ZERO: Self = Self(0.0);
    /// Range end.
    pub const ONE: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`. NaN maps to 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw scalar.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<'de> serde::Deserialize<'de> for Progress {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::new(f64::deserialize(d)?))
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Identifier of a render node that receives mapped outputs.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Build from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a measured element (the reference element of a scroll range).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scroll axis a range is measured along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Vertical scrolling.
    #[default]
    Y,
    /// Horizontal scrolling.
    X,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Y => v.y,
            Self::X => v.x,
        }
    }

    /// Extent of `s` along this axis.
    pub fn of_size(self, s: Size) -> f64 {
        match self {
            Self::Y => s.height,
            Self::X => s.width,
        }
    }

    /// `(start, length)` of `r` along this axis.
    pub fn span_of(self, r: Rect) -> (f64, f64) {
        match self {
            Self::Y => (r.y0, r.height()),
            Self::X => (r.x0, r.width()),
        }
    }
}

/// Element bounds in scroll-content coordinates (independent of the current scroll offset).
pub type ElementBox = Rect;

/// One readout of the host scroll container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Current scroll offset of the container.
    pub offset: Vec2,
    /// Visible viewport size.
    pub viewport: Size,
}

impl ScrollMetrics {
    /// `(offset, viewport length)` along `axis`.
    pub fn along(self, axis: Axis) -> (f64, f64) {
        (axis.of_vec(self.offset), axis.of_size(self.viewport))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
