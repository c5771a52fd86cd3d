use chrono::{Duration, NaiveDate};

use crate::error::ForecastError;

/// `periods` dates after `anchor`, `step_days` apart; the first is one step after the anchor.
pub fn forecast_dates(
    anchor: NaiveDate,
    step_days: i64,
    periods: usize,
) -> Result<Vec<NaiveDate>, ForecastError> {
    (1..=periods)
        .map(|i| {
            i64::try_from(i)
                .ok()
                .and_then(|i| step_days.checked_mul(i))
                .and_then(Duration::try_days)
                .and_then(|delta| anchor.checked_add_signed(delta))
                .ok_or_else(|| {
                    ForecastError::invalid_input(format!(
                        "forecast date {i} steps after {anchor} is out of range"
                    ))
                })
        })
        .collect()
}
