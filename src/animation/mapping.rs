use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::core::Progress,
    foundation::error::{ScrollfxError, ScrollfxResult},
    foundation::math::lerp,
};

/// One vertex of a piecewise-linear mapping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    /// Position on the progress axis.
    pub progress: f64,
    /// Output value at that position.
    pub value: f64,
}

impl Breakpoint {
    /// Build a breakpoint.
    pub fn new(progress: f64, value: f64) -> Self {
        Self { progress, value }
    }
}

impl From<(f64, f64)> for Breakpoint {
    fn from((progress, value): (f64, f64)) -> Self {
        Self { progress, value }
    }
}

type Breakpoints = SmallVec<[Breakpoint; 4]>;

/// Validated piecewise-linear function from progress to an output value.
///
/// Invariants (checked by [`Mapping::new`] and on deserialization):
/// - at least two breakpoints
/// - all coordinates finite
/// - progress values non-decreasing
///
/// Mappings are declared once per visual effect and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MappingDef", into = "MappingDef")]
pub struct Mapping {
    breakpoints: Breakpoints,
    ease: Ease,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct MappingDef {
    breakpoints: Vec<Breakpoint>,
    #[serde(default, skip_serializing_if = "is_linear")]
    ease: Ease,
}

fn is_linear(ease: &Ease) -> bool {
    *ease == Ease::Linear
}

impl TryFrom<MappingDef> for Mapping {
    type Error = ScrollfxError;

    fn try_from(def: MappingDef) -> ScrollfxResult<Self> {
        Ok(Self::new(def.breakpoints)?.with_ease(def.ease))
    }
}

impl From<Mapping> for MappingDef {
    fn from(m: Mapping) -> Self {
        Self {
            breakpoints: m.breakpoints.into_vec(),
            ease: m.ease,
        }
    }
}

impl Mapping {
    /// Validate and build a linear mapping.
    pub fn new(breakpoints: impl IntoIterator<Item = Breakpoint>) -> ScrollfxResult<Self> {
        let breakpoints: Breakpoints = breakpoints.into_iter().collect();
        if breakpoints.len() < 2 {
            return Err(ScrollfxError::configuration(format!(
                "mapping needs at least 2 breakpoints, got {}",
                breakpoints.len()
            )));
        }
        if let Some(i) = breakpoints
            .iter()
            .position(|b| !b.progress.is_finite() || !b.value.is_finite())
        {
            return Err(ScrollfxError::configuration(format!(
                "mapping breakpoint {i} is not finite"
            )));
        }
        if let Some(i) = breakpoints
            .windows(2)
            .position(|w| w[0].progress > w[1].progress)
        {
            return Err(ScrollfxError::configuration(format!(
                "mapping progress must be non-decreasing (breakpoint {} > breakpoint {})",
                i,
                i + 1
            )));
        }
        Ok(Self {
            breakpoints,
            ease: Ease::Linear,
        })
    }

    /// Build from parallel progress/value lists, the way effects are usually declared.
    pub fn from_pairs(progress: &[f64], values: &[f64]) -> ScrollfxResult<Self> {
        if progress.len() != values.len() {
            return Err(ScrollfxError::configuration(format!(
                "mapping input/output length mismatch ({} vs {})",
                progress.len(),
                values.len()
            )));
        }
        Self::new(
            progress
                .iter()
                .zip(values)
                .map(|(&p, &v)| Breakpoint::new(p, v)),
        )
    }

    /// Two-point mapping from `(p0, v0)` to `(p1, v1)`.
    pub fn linear(p0: f64, v0: f64, p1: f64, v1: f64) -> ScrollfxResult<Self> {
        Self::new([Breakpoint::new(p0, v0), Breakpoint::new(p1, v1)])
    }

    /// Replace the per-segment easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Sorted breakpoints.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Per-segment easing curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Number of linear segments (`breakpoints - 1`).
    pub fn segments(&self) -> usize {
        self.breakpoints.len() - 1
    }

    /// Evaluate at `progress`. Pure: identical inputs always give identical outputs.
    ///
    /// Outside the breakpoint span the first/last value is held. At a breakpoint the
    /// declared value is returned exactly; at duplicate progress values the later one wins.
    pub fn evaluate(&self, progress: impl Into<Progress>) -> f64 {
        self.sample(progress.into().get())
    }

    /// Evaluate at a raw position that is not clamped to `[0, 1]` first.
    pub(crate) fn sample(&self, p: f64) -> f64 {
        let keys = &self.breakpoints;
        let idx = keys.partition_point(|b| b.progress <= p);

        if idx == 0 {
            return keys[0].value;
        }
        if idx >= keys.len() {
            return keys[keys.len() - 1].value;
        }

        // keys[idx - 1].progress <= p < keys[idx].progress, so the span is positive.
        let a = keys[idx - 1];
        let b = keys[idx];
        let t = (p - a.progress) / (b.progress - a.progress);
        lerp(a.value, b.value, self.ease.apply(t))
    }
}

/// Free-function form of [`Mapping::evaluate`].
pub fn evaluate(mapping: &Mapping, progress: Progress) -> f64 {
    mapping.evaluate(progress)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mapping.rs"]
mod tests;
