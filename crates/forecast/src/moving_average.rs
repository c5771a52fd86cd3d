//! Short-window moving average with a damped trend factor.
//!
//! Model:
//! - Average the last `window = clamp(n / 3, 1, max_window)` quantities.
//! - Take the relative change between the last two quantities, scale it by
//!   `damping`, and compound `1 + damped_change` once per forecast step.
//! - The interval half-width is `2 · sqrt(average)`, constant across steps.
//! - Runaway compounding saturates at `f64::MAX` instead of overflowing.

use chrono::NaiveDate;
use tracing::debug;

use crate::model::{ConfidenceLevel, ForecastPoint};
use crate::numeric::{mean, round, saturate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageModel {
    pub window: usize,
    pub average: f64,
    pub trend_factor: f64,
}

impl MovingAverageModel {
    pub fn fit(values: &[f64], max_window: usize, damping: f64) -> Self {
        let n = values.len();
        let window = (n / 3).min(max_window).max(1);
        let average = mean(&values[n.saturating_sub(window)..]);

        let recent_trend = match values {
            [.., prev, last] if *prev != 0.0 => (last - prev) / prev,
            _ => 0.0,
        };
        let trend_factor = 1.0 + recent_trend * damping;

        debug!(n, window, average, trend_factor, "fitted moving average");

        Self {
            window,
            average,
            trend_factor,
        }
    }

    pub fn spread(&self) -> f64 {
        self.average.max(0.0).sqrt() * 2.0
    }

    /// One point per date; `level` only sets the reported confidence.
    pub fn forecast(
        &self,
        dates: &[NaiveDate],
        level: ConfidenceLevel,
        min_prediction: f64,
    ) -> Vec<ForecastPoint> {
        let spread = self.spread();

        dates
            .iter()
            .zip(1i32..)
            .map(|(date, step)| {
                let predicted = saturate(self.average * self.trend_factor.powi(step));
                ForecastPoint {
                    date: *date,
                    predicted_value: round(predicted).max(min_prediction),
                    lower_bound: round(predicted - spread).max(0.0),
                    upper_bound: saturate(round(predicted + spread)).max(0.0),
                    confidence: level.fraction(),
                }
            })
            .collect()
    }
}
