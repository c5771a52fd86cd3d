//! Forecast configuration.
//!
//! [`ForecastConfig::default`] reproduces the engine's fixed behavior: a weekly
//! cadence, the trend anchored on the last sale, the moving average anchored on
//! the request date, and a 60/40 blend.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ForecastError;

/// Where a model starts counting forecast dates from.
///
/// The first forecast date is always one step after the anchor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// The last date of the aggregated history.
    LastObservation,
    /// The calendar date of the request clock.
    Today,
}

impl FromStr for AnchorPolicy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_observation" | "last-observation" => Ok(Self::LastObservation),
            "today" | "now" => Ok(Self::Today),
            other => Err(ForecastError::invalid_input(format!(
                "unknown anchor policy '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Days between consecutive forecast dates.
    pub step_days: i64,
    pub trend_anchor: AnchorPolicy,
    pub moving_average_anchor: AnchorPolicy,
    pub trend_weight: f64,
    pub moving_average_weight: f64,
    /// Upper bound on the moving-average window (the window is also capped at n/3).
    pub max_window: usize,
    /// Share of the last relative change carried into the moving-average trend factor.
    pub damping: f64,
    /// Floor applied to every predicted value.
    pub min_prediction: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            step_days: 7,
            trend_anchor: AnchorPolicy::LastObservation,
            moving_average_anchor: AnchorPolicy::Today,
            trend_weight: 0.6,
            moving_average_weight: 0.4,
            max_window: 4,
            damping: 0.5,
            min_prediction: 10.0,
        }
    }
}

impl ForecastConfig {
    /// Load overrides from the environment, keeping defaults for anything unset.
    ///
    /// - `STOCKCAST_STEP_DAYS`
    /// - `STOCKCAST_TREND_ANCHOR` / `STOCKCAST_MA_ANCHOR` (`last_observation` | `today`)
    /// - `STOCKCAST_TREND_WEIGHT` (the moving-average weight becomes `1 - w`)
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(step) = parse_setting::<i64, _>(&lookup, "STOCKCAST_STEP_DAYS") {
            cfg.step_days = step;
        }
        if let Some(anchor) = parse_setting::<AnchorPolicy, _>(&lookup, "STOCKCAST_TREND_ANCHOR") {
            cfg.trend_anchor = anchor;
        }
        if let Some(anchor) = parse_setting::<AnchorPolicy, _>(&lookup, "STOCKCAST_MA_ANCHOR") {
            cfg.moving_average_anchor = anchor;
        }
        if let Some(w) = parse_setting::<f64, _>(&lookup, "STOCKCAST_TREND_WEIGHT") {
            cfg.trend_weight = w;
            cfg.moving_average_weight = 1.0 - w;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.step_days <= 0 {
            return Err(ForecastError::invalid_input(format!(
                "step_days must be positive, got {}",
                self.step_days
            )));
        }

        let weights_ok = [self.trend_weight, self.moving_average_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !weights_ok || (self.trend_weight + self.moving_average_weight - 1.0).abs() > 1e-9 {
            return Err(ForecastError::invalid_input(
                "model weights must be non-negative and sum to 1",
            ));
        }

        if self.max_window == 0 {
            return Err(ForecastError::invalid_input("max_window must be >= 1"));
        }

        if !self.damping.is_finite() {
            return Err(ForecastError::invalid_input("damping must be finite"));
        }

        if !(self.min_prediction.is_finite() && self.min_prediction >= 0.0) {
            return Err(ForecastError::invalid_input(
                "min_prediction must be a finite non-negative number",
            ));
        }

        Ok(())
    }
}

fn parse_setting<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring invalid forecast setting");
            None
        }
    }
}
