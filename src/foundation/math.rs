pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fraction of the way `x` sits between `a` and `b`; `None` on a zero-width span.
pub(crate) fn inverse_lerp(a: f64, b: f64, x: f64) -> Option<f64> {
    let span = b - a;
    if span == 0.0 || !span.is_finite() {
        return None;
    }
    Some((x - a) / span)
}

pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

pub(crate) fn is_finite_all(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
