use crate::{
    animation::mapping::{Breakpoint, Mapping},
    foundation::error::{ScrollfxError, ScrollfxResult},
};

/// Opacity-style ramp from 0 at `start` to 1 at `end`.
pub fn fade_window(start: f64, end: f64) -> ScrollfxResult<Mapping> {
    Mapping::linear(start, 0.0, end, 1.0)
}

/// `count` back-to-back windows of width `step` starting at `start`, each ramping
/// `from -> to`. Element `i` animates over `[start + i*step, start + (i+1)*step]`.
pub fn stagger(
    count: usize,
    start: f64,
    step: f64,
    from: f64,
    to: f64,
) -> ScrollfxResult<Vec<Mapping>> {
    if !step.is_finite() || step < 0.0 {
        return Err(ScrollfxError::configuration(
            "stagger step must be finite and >= 0",
        ));
    }
    (0..count)
        .map(|i| {
            let p0 = start + step * i as f64;
            Mapping::linear(p0, from, p0 + step, to)
        })
        .collect()
}

/// Mirror a mapping's output values (`v -> -v`), e.g. for alternating left/right entries.
pub fn mirror(mapping: &Mapping) -> Mapping {
    let flipped = mapping
        .breakpoints()
        .iter()
        .map(|b| Breakpoint::new(b.progress, -b.value));
    match Mapping::new(flipped) {
        Ok(m) => m.with_ease(mapping.ease()),
        // Negation keeps every invariant of an already-valid mapping.
        Err(_) => mapping.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
