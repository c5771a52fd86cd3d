//! In-sample accuracy of the trend model.

use tracing::warn;

use crate::numeric::mean;

/// Reported when the score cannot be computed.
pub const ACCURACY_FALLBACK: f64 = 75.0;
pub const ACCURACY_FLOOR: f64 = 70.0;
pub const ACCURACY_CEILING: f64 = 95.0;

/// Accuracy percentage of the trend model's in-sample fit: `100 - NRMSE·100`,
/// clamped to `[70, 95]`.
///
/// This scores the trend model alone, not the blended forecast. Mismatched or
/// empty inputs and an all-zero history score [`ACCURACY_FALLBACK`].
pub fn estimate_trend_accuracy(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        warn!(
            actual = actual.len(),
            predicted = predicted.len(),
            "cannot score trend fit, using fallback accuracy"
        );
        return ACCURACY_FALLBACK;
    }

    let squared_errors: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .collect();
    let mse = mean(&squared_errors);
    let mean_actual = mean(actual);

    if mean_actual == 0.0 {
        warn!("history sums to zero, using fallback accuracy");
        return ACCURACY_FALLBACK;
    }

    let accuracy = 100.0 - (mse.sqrt() / mean_actual) * 100.0;
    accuracy.max(ACCURACY_FLOOR).min(ACCURACY_CEILING)
}
