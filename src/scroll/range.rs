use crate::{
    foundation::core::{Axis, ElementId, Progress, ScrollMetrics},
    foundation::error::{ScrollfxError, ScrollfxResult},
    foundation::math::inverse_lerp,
    scroll::edge::Edge,
    scroll::host::ScrollHost,
};

/// Span of scrolling over which progress is measured for one reference element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRange {
    /// Element whose position drives the range.
    pub element: ElementId,
    /// Edge that maps to progress 0.
    pub start: Edge,
    /// Edge that maps to progress 1.
    pub end: Edge,
    /// Scroll axis.
    #[serde(default)]
    pub axis: Axis,
}

impl ScrollRange {
    /// Validate and build a vertical range.
    pub fn new(element: impl Into<String>, start: Edge, end: Edge) -> ScrollfxResult<Self> {
        let range = Self {
            element: ElementId::new(element),
            start,
            end,
            axis: Axis::Y,
        };
        range.validate()?;
        Ok(range)
    }

    /// Range from the element entering the viewport until it has fully left
    /// (`"start end"` to `"end start"`).
    pub fn through_viewport(element: impl Into<String>) -> Self {
        Self {
            element: ElementId::new(element),
            start: Edge::ENTER,
            end: Edge::EXIT,
            axis: Axis::Y,
        }
    }

    /// Range over which a tall element scrolls past a pinned viewport
    /// (`"start start"` to `"end end"`).
    pub fn pinned_span(element: impl Into<String>) -> Self {
        Self {
            element: ElementId::new(element),
            start: Edge::START_START,
            end: Edge::END_END,
            axis: Axis::Y,
        }
    }

    /// Builder-style axis override.
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Check that the two edges name distinct reference points.
    pub fn validate(&self) -> ScrollfxResult<()> {
        if self.element.as_str().trim().is_empty() {
            return Err(ScrollfxError::configuration(
                "scroll range element id must be non-empty",
            ));
        }
        if self.start == self.end {
            return Err(ScrollfxError::configuration(format!(
                "scroll range for '{}' has identical start and end edges ('{}')",
                self.element, self.start
            )));
        }
        Ok(())
    }

    /// Measure the element and resolve both edges to scroll offsets.
    pub fn resolve(&self, host: &(impl ScrollHost + ?Sized)) -> ScrollfxResult<ResolvedRange> {
        let metrics = host.metrics();
        self.resolve_with(host, metrics)
    }

    /// Like [`ScrollRange::resolve`], reusing a metrics readout taken earlier in the frame.
    pub(crate) fn resolve_with(
        &self,
        host: &(impl ScrollHost + ?Sized),
        metrics: ScrollMetrics,
    ) -> ScrollfxResult<ResolvedRange> {
        let bounds = host.measure(&self.element).ok_or_else(|| {
            ScrollfxError::unattached(format!("element '{}' is not attached", self.element))
        })?;
        let (elem_start, elem_len) = self.axis.span_of(bounds);
        let (_, viewport_len) = metrics.along(self.axis);
        Ok(ResolvedRange {
            start_px: self.start.scroll_offset(elem_start, elem_len, viewport_len),
            end_px: self.end.scroll_offset(elem_start, elem_len, viewport_len),
        })
    }
}

/// A [`ScrollRange`] resolved to concrete scroll offsets for the current layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedRange {
    /// Scroll offset at progress 0.
    pub start_px: f64,
    /// Scroll offset at progress 1.
    pub end_px: f64,
}

impl ResolvedRange {
    /// Progress at scroll offset `scroll`, clamped to `[0, 1]`.
    ///
    /// A zero-length range is a step: 1 once `scroll` reaches it, else 0.
    pub fn progress_at(&self, scroll: f64) -> Progress {
        match inverse_lerp(self.start_px, self.end_px, scroll) {
            Some(t) => Progress::new(t),
            None if scroll >= self.end_px => Progress::ONE,
            None => Progress::ZERO,
        }
    }

    /// Signed length of the range in px.
    pub fn len_px(&self) -> f64 {
        self.end_px - self.start_px
    }

    /// True when both edges resolve to the same offset.
    pub fn is_degenerate(&self) -> bool {
        self.start_px == self.end_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/range.rs"]
mod tests;
