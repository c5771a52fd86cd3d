//! Forecast inputs and outputs.
//!
//! Everything here is built fresh per request and never mutated afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, DomainResult};

/// A single recorded sale: `quantity` units sold on `date`.
///
/// Several observations may share a date; aggregation sums them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub quantity: u64,
}

impl Observation {
    pub fn new(date: NaiveDate, quantity: u64) -> Self {
        Self { date, quantity }
    }
}

/// One entry of an [`AggregatedSeries`]: total quantity sold on a distinct date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub total_quantity: u64,
}

/// Chronologically ordered, date-unique sales series.
///
/// Invariant: dates strictly increase. The only constructor is
/// [`crate::aggregate::aggregate_observations`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedSeries {
    points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    pub(crate) fn from_sorted(points: Vec<SeriesPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Quantities as `f64`, in date order.
    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_quantity as f64).collect()
    }
}

/// Confidence level of the prediction interval, in percent.
///
/// Accepted range is `1..=100` so that [`ConfidenceLevel::fraction`] stays in `(0, 1]`.
/// Only 80, 85, 90, 95 and 99 have a dedicated z-score; anything else uses the 95% one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    pub const P80: Self = Self(80);
    pub const P85: Self = Self(85);
    pub const P90: Self = Self(90);
    pub const P95: Self = Self(95);
    pub const P99: Self = Self(99);

    pub fn new(percent: u8) -> DomainResult<Self> {
        if percent == 0 || percent > 100 {
            return Err(DomainError::validation(format!(
                "confidence level must be within 1..=100, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Two-sided standard-normal quantile for this level.
    pub fn z_score(&self) -> f64 {
        match self.0 {
            80 => 1.282,
            85 => 1.440,
            90 => 1.645,
            95 => 1.960,
            99 => 2.576,
            _ => 1.960,
        }
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::P95
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(value: ConfidenceLevel) -> Self {
        value.0
    }
}

impl core::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A single forecast step.
///
/// Values are whole numbers after rounding; they stay `f64` so presentation
/// layers can chart them without conversion.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Fraction in `(0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetadata {
    pub periods: usize,
    pub method: String,
    pub confidence_level: u8,
}

/// Complete answer to a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    /// In-sample accuracy percentage, always within `[70, 95]`.
    pub accuracy: f64,
    pub generated_at: DateTime<Utc>,
    pub metadata: ForecastMetadata,
}
