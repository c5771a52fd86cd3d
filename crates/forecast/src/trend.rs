//! Linear trend model (ordinary least squares over the series index).
//!
//! Model:
//! - `x` is the position in the aggregated series (`0..n`), `y` the quantity.
//! - Slope and intercept come from the closed-form OLS sums.
//! - The prediction interval half-width is `z · se · sqrt(1 + 1/n)`, where `se`
//!   is the residual standard error with `n - 2` degrees of freedom.

use chrono::NaiveDate;
use tracing::debug;

use crate::model::{ConfidenceLevel, ForecastPoint};
use crate::numeric::round;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
    /// Residual standard error. Zero when the fit has no degrees of freedom left (n <= 2).
    pub standard_error: f64,
    n: usize,
}

impl TrendModel {
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        let nf = n as f64;

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = nf * sum_xx - sum_x * sum_x;
        // A single point (or none) has no slope; treat it as flat.
        let slope = if denominator.abs() > f64::EPSILON {
            (nf * sum_xy - sum_x * sum_y) / denominator
        } else {
            0.0
        };
        let intercept = if n == 0 { 0.0 } else { (sum_y - slope * sum_x) / nf };

        let rss: f64 = values
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let r = y - (slope * i as f64 + intercept);
                r * r
            })
            .sum();
        let standard_error = if n > 2 { (rss / (nf - 2.0)).sqrt() } else { 0.0 };

        debug!(n, slope, intercept, standard_error, "fitted linear trend");

        Self {
            slope,
            intercept,
            standard_error,
            n,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Unrounded fitted values for every historical index.
    pub fn in_sample(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.predict(i as f64)).collect()
    }

    pub fn margin_of_error(&self, level: ConfidenceLevel) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        level.z_score() * self.standard_error * (1.0 + 1.0 / self.n as f64).sqrt()
    }

    /// One point per date, continuing the index past the last observation.
    pub fn forecast(
        &self,
        dates: &[NaiveDate],
        level: ConfidenceLevel,
        min_prediction: f64,
    ) -> Vec<ForecastPoint> {
        let margin = self.margin_of_error(level);

        dates
            .iter()
            .enumerate()
            .map(|(step, date)| {
                let predicted = self.predict((self.n + step) as f64);
                ForecastPoint {
                    date: *date,
                    predicted_value: round(predicted).max(min_prediction),
                    lower_bound: round(predicted - margin).max(0.0),
                    upper_bound: round(predicted + margin).max(0.0),
                    confidence: level.fraction(),
                }
            })
            .collect()
    }
}
