//! Small numeric helpers shared by the models.

/// Round to the nearest integer, ties to even.
///
/// Every rounding step in the pipeline goes through here so sub-model points and
/// their blend agree on `x.5` cases.
pub(crate) fn round(x: f64) -> f64 {
    x.round_ties_even()
}

/// Clamp overflowed arithmetic back into the finite range.
///
/// Compounded growth and bound averaging can exceed `f64::MAX`; forecast values
/// must stay finite numbers.
pub(crate) fn saturate(x: f64) -> f64 {
    x.clamp(f64::MIN, f64::MAX)
}

pub(crate) fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}
