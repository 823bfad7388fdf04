use crate::{
    foundation::core::{Axis, ElementBox, ScrollMetrics},
    foundation::error::{ScrollfxError, ScrollfxResult},
};

/// When an element counts as "in view".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealConfig {
    /// Visible fraction of the element required to enter; `0` means any overlap.
    #[serde(default)]
    pub amount: f64,
    /// Fire `Enter` at most once and never `Leave`.
    #[serde(default)]
    pub once: bool,
    /// Grows (positive) or shrinks (negative) the viewport on both ends, in px.
    #[serde(default)]
    pub margin_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            amount: 0.0,
            once: true,
            margin_px: 0.0,
        }
    }
}

impl RevealConfig {
    /// Check value ranges.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if !self.amount.is_finite() || !(0.0..=1.0).contains(&self.amount) {
            return Err(ScrollfxError::configuration(
                "reveal amount must be within [0, 1]",
            ));
        }
        if !self.margin_px.is_finite() {
            return Err(ScrollfxError::configuration("reveal margin_px must be finite"));
        }
        Ok(())
    }
}

/// Visibility transition reported by a [`RevealState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealEvent {
    /// The element crossed into view.
    Enter,
    /// The element left view.
    Leave,
}

/// Fraction of `element` inside the (margin-adjusted) viewport along `axis`.
pub fn visible_fraction(
    element: ElementBox,
    metrics: ScrollMetrics,
    axis: Axis,
    margin_px: f64,
) -> f64 {
    let (elem_start, elem_len) = axis.span_of(element);
    let (offset, viewport_len) = metrics.along(axis);
    let view_start = offset - margin_px;
    let view_end = offset + viewport_len + margin_px;
    if view_end <= view_start {
        return 0.0;
    }

    let overlap = (elem_start + elem_len).min(view_end) - elem_start.max(view_start);
    if elem_len <= 0.0 {
        // Zero-size element: visible iff its position is inside the viewport.
        return if elem_start >= view_start && elem_start <= view_end {
            1.0
        } else {
            0.0
        };
    }
    (overlap / elem_len).clamp(0.0, 1.0)
}

/// Hysteresis-free enter/leave tracker for one watched element.
#[derive(Clone, Debug)]
pub struct RevealState {
    config: RevealConfig,
    visible: bool,
    fired_once: bool,
}

impl RevealState {
    /// Start hidden.
    pub fn new(config: RevealConfig) -> ScrollfxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            visible: false,
            fired_once: false,
        })
    }

    /// Config this state was built with.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Whether the element currently counts as visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True once a `once` trigger has fired; it will never report again.
    pub fn is_spent(&self) -> bool {
        self.config.once && self.fired_once
    }

    /// Feed the latest visible fraction; returns a transition if one happened.
    pub fn update(&mut self, fraction: f64) -> Option<RevealEvent> {
        if self.is_spent() {
            return None;
        }
        let now_visible = if self.config.amount <= 0.0 {
            fraction > 0.0
        } else {
            fraction >= self.config.amount
        };

        match (self.visible, now_visible) {
            (false, true) => {
                self.visible = true;
                self.fired_once = true;
                Some(RevealEvent::Enter)
            }
            (true, false) => {
                self.visible = false;
                Some(RevealEvent::Leave)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/reveal.rs"]
mod tests;
