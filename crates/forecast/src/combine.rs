//! Weighted blend of the trend and moving-average forecasts.

use crate::model::ForecastPoint;
use crate::numeric::{round, saturate};

/// Blend two equal-length forecasts index by index.
///
/// Date and confidence come from the trend forecast. Bounds are the plain mean
/// of both models' bounds, widened when needed so they always enclose the
/// blended prediction.
pub fn combine_forecasts(
    trend: &[ForecastPoint],
    moving_average: &[ForecastPoint],
    trend_weight: f64,
    moving_average_weight: f64,
) -> Vec<ForecastPoint> {
    debug_assert_eq!(trend.len(), moving_average.len());

    trend
        .iter()
        .zip(moving_average)
        .map(|(t, m)| {
            let predicted_value = saturate(round(
                trend_weight * t.predicted_value + moving_average_weight * m.predicted_value,
            ));
            let lower_bound = round(t.lower_bound / 2.0 + m.lower_bound / 2.0);
            let upper_bound = round(t.upper_bound / 2.0 + m.upper_bound / 2.0);

            ForecastPoint {
                date: t.date,
                predicted_value,
                lower_bound: lower_bound.min(predicted_value),
                upper_bound: upper_bound.max(predicted_value),
                confidence: t.confidence,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(date: NaiveDate, predicted: f64, lower: f64, upper: f64) -> ForecastPoint {
        ForecastPoint {
            date,
            predicted_value: predicted,
            lower_bound: lower,
            upper_bound: upper,
            confidence: 0.9,
        }
    }

    #[test]
    fn blends_reference_forecasts() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let other = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let trend = vec![point(d1, 28.0, 19.0, 36.0), point(d2, 32.0, 23.0, 40.0)];
        let ma = vec![point(other, 33.0, 23.0, 43.0), point(other, 44.0, 34.0, 54.0)];

        let combined = combine_forecasts(&trend, &ma, 0.6, 0.4);
        assert_eq!(combined[0], point(d1, 30.0, 21.0, 40.0));
        assert_eq!(combined[1], point(d2, 37.0, 28.0, 47.0));
    }

    #[test]
    fn saturated_inputs_blend_to_finite_values() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let trend = vec![point(d, 500.0, 400.0, 600.0)];
        let ma = vec![point(d, f64::MAX, f64::MAX, f64::MAX)];

        let combined = combine_forecasts(&trend, &ma, 0.6, 0.4);
        assert!(combined[0].predicted_value.is_finite());
        assert!(combined[0].lower_bound.is_finite());
        assert!(combined[0].upper_bound.is_finite());
        assert!(combined[0].lower_bound <= combined[0].predicted_value);
        assert!(combined[0].predicted_value <= combined[0].upper_bound);
    }

    #[test]
    fn bounds_are_widened_around_divergent_models() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let trend = vec![point(d, 100.0, 100.0, 100.0)];
        let ma = vec![point(d, 10.0, 0.0, 10.0)];

        let combined = combine_forecasts(&trend, &ma, 0.6, 0.4);
        assert_eq!(combined[0].predicted_value, 64.0);
        assert_eq!(combined[0].lower_bound, 50.0);
        assert_eq!(combined[0].upper_bound, 64.0);
    }
}
