use std::{fmt, str::FromStr};

use crate::foundation::error::{ScrollfxError, ScrollfxResult};

/// A point along an element or viewport, resolved against its length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Leading edge (`0`).
    Start,
    /// Midpoint (`0.5`).
    Center,
    /// Trailing edge (`1`).
    End,
    /// Fraction of the length.
    Fraction(f64),
    /// Absolute px offset from the leading edge.
    Px(f64),
}

impl Anchor {
    /// Offset from the leading edge for a span of `len` px.
    pub fn resolve(self, len: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5 * len,
            Self::End => len,
            Self::Fraction(f) => f * len,
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollfxError;

    fn from_str(s: &str) -> ScrollfxResult<Self> {
        let s = s.trim();
        let anchor = match s {
            "start" => Self::Start,
            "center" => Self::Center,
            "end" => Self::End,
            _ => {
                let parsed = if let Some(px) = s.strip_suffix("px") {
                    px.trim().parse::<f64>().map(Self::Px)
                } else {
                    s.parse::<f64>().map(Self::Fraction)
                };
                parsed.map_err(|_| {
                    ScrollfxError::configuration(format!(
                        "invalid edge anchor '{s}' (expected start|center|end|<fraction>|<n>px)"
                    ))
                })?
            }
        };
        match anchor {
            Self::Fraction(v) | Self::Px(v) if !v.is_finite() => Err(
                ScrollfxError::configuration(format!("edge anchor '{s}' must be finite")),
            ),
            a => Ok(a),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
            Self::Px(v) => write!(f, "{v}px"),
        }
    }
}

/// Alignment condition "this point of the element meets this point of the viewport".
///
/// Written as `"<element> <viewport>"`, e.g. `"start end"`: the element's start reaches the
/// viewport's end.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edge {
    /// Anchor on the reference element.
    pub element: Anchor,
    /// Anchor on the viewport.
    pub viewport: Anchor,
}

impl Edge {
    /// Element start meets viewport end: the element is about to enter.
    pub const ENTER: Self = Self::new(Anchor::Start, Anchor::End);
    /// Element end meets viewport start: the element has just left.
    pub const EXIT: Self = Self::new(Anchor::End, Anchor::Start);
    /// Element start meets viewport start.
    pub const START_START: Self = Self::new(Anchor::Start, Anchor::Start);
    /// Element end meets viewport end.
    pub const END_END: Self = Self::new(Anchor::End, Anchor::End);

    /// Pair two anchors.
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this edge is met, for an element spanning
    /// `[elem_start, elem_start + elem_len]` in content coordinates.
    pub fn scroll_offset(self, elem_start: f64, elem_len: f64, viewport_len: f64) -> f64 {
        elem_start + self.element.resolve(elem_len) - self.viewport.resolve(viewport_len)
    }
}

impl FromStr for Edge {
    type Err = ScrollfxError;

    fn from_str(s: &str) -> ScrollfxResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScrollfxError::configuration(format!(
                "edge '{s}' must have exactly two anchors, e.g. \"start end\""
            )));
        };
        Ok(Self::new(element.parse()?, viewport.parse()?))
    }
}

impl TryFrom<String> for Edge {
    type Error = ScrollfxError;

    fn try_from(s: String) -> ScrollfxResult<Self> {
        s.parse()
    }
}

impl From<Edge> for String {
    fn from(e: Edge) -> Self {
        e.to_string()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/edge.rs"]
mod tests;
