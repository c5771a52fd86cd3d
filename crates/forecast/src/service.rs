//! Forecast facade: aggregation, both models, blend and accuracy in one call.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::accuracy::estimate_trend_accuracy;
use crate::aggregate::aggregate_observations;
use crate::combine::combine_forecasts;
use crate::config::{AnchorPolicy, ForecastConfig};
use crate::error::ForecastError;
use crate::model::{ConfidenceLevel, ForecastMetadata, ForecastResult, Observation};
use crate::moving_average::MovingAverageModel;
use crate::schedule::forecast_dates;
use crate::trend::TrendModel;

pub const COMBINED_METHOD: &str = "Combined (Linear + Moving Average)";

/// Minimum number of distinct dates needed to fit a trend.
pub const MIN_SERIES_LEN: usize = 2;

/// Stateless forecast engine. Holds only validated configuration, so one
/// instance can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ForecastService {
    config: ForecastConfig,
}

impl ForecastService {
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `periods` steps ahead, stamped with the current time.
    pub fn generate_forecast(
        &self,
        observations: &[Observation],
        periods: usize,
        confidence_level: ConfidenceLevel,
    ) -> Result<ForecastResult, ForecastError> {
        self.generate_forecast_at(observations, periods, confidence_level, Utc::now())
    }

    /// Same as [`Self::generate_forecast`] with an explicit clock.
    ///
    /// `now` sets `generated_at` and the date used by [`AnchorPolicy::Today`].
    pub fn generate_forecast_at(
        &self,
        observations: &[Observation],
        periods: usize,
        confidence_level: ConfidenceLevel,
        now: DateTime<Utc>,
    ) -> Result<ForecastResult, ForecastError> {
        if periods == 0 {
            return Err(ForecastError::invalid_input("periods must be >= 1"));
        }

        let series = aggregate_observations(observations);
        let last_date = match series.last_date() {
            Some(last) if series.len() >= MIN_SERIES_LEN => last,
            _ => {
                warn!(
                    observations = observations.len(),
                    points = series.len(),
                    "not enough history to forecast"
                );
                return Err(ForecastError::InsufficientData {
                    points: series.len(),
                });
            }
        };

        let values = series.quantities();
        let today = now.date_naive();
        let cfg = &self.config;

        let trend = TrendModel::fit(&values);
        let trend_dates = self.dates_for(cfg.trend_anchor, last_date, today, periods)?;
        let trend_points = trend.forecast(&trend_dates, confidence_level, cfg.min_prediction);

        let moving_average = MovingAverageModel::fit(&values, cfg.max_window, cfg.damping);
        let ma_dates = self.dates_for(cfg.moving_average_anchor, last_date, today, periods)?;
        let ma_points = moving_average.forecast(&ma_dates, confidence_level, cfg.min_prediction);

        let points = combine_forecasts(
            &trend_points,
            &ma_points,
            cfg.trend_weight,
            cfg.moving_average_weight,
        );
        let accuracy = estimate_trend_accuracy(&values, &trend.in_sample());

        info!(
            history = series.len(),
            periods,
            confidence = %confidence_level,
            accuracy,
            "generated sales forecast"
        );

        Ok(ForecastResult {
            points,
            accuracy,
            generated_at: now,
            metadata: ForecastMetadata {
                periods,
                method: COMBINED_METHOD.to_string(),
                confidence_level: confidence_level.percent(),
            },
        })
    }

    fn dates_for(
        &self,
        policy: AnchorPolicy,
        last_date: NaiveDate,
        today: NaiveDate,
        periods: usize,
    ) -> Result<Vec<NaiveDate>, ForecastError> {
        let anchor = match policy {
            AnchorPolicy::LastObservation => last_date,
            AnchorPolicy::Today => today,
        };
        debug!(?policy, %anchor, "anchoring forecast dates");
        forecast_dates(anchor, self.config.step_days, periods)
    }
}

/// Forecast with the default configuration.
pub fn generate_forecast(
    observations: &[Observation],
    periods: usize,
    confidence_level: ConfidenceLevel,
) -> Result<ForecastResult, ForecastError> {
    ForecastService::default().generate_forecast(observations, periods, confidence_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    fn reference_history() -> Vec<Observation> {
        vec![
            Observation::new(date(2024, 1, 1), 10),
            Observation::new(date(2024, 1, 8), 20),
            Observation::new(date(2024, 1, 15), 15),
            Observation::new(date(2024, 1, 22), 25),
        ]
    }

    #[test]
    fn reference_scenario_matches_expected_forecast() {
        let result = ForecastService::default()
            .generate_forecast_at(&reference_history(), 2, ConfidenceLevel::P90, fixed_now())
            .unwrap();

        assert_eq!(result.points.len(), 2);

        let first = result.points[0];
        assert_eq!(first.date, date(2024, 1, 29));
        assert_eq!(
            (first.predicted_value, first.lower_bound, first.upper_bound),
            (30.0, 21.0, 40.0)
        );

        let second = result.points[1];
        assert_eq!(second.date, date(2024, 2, 5));
        assert_eq!(
            (second.predicted_value, second.lower_bound, second.upper_bound),
            (37.0, 28.0, 47.0)
        );

        assert!(result.points.iter().all(|p| p.confidence == 0.9));
        assert_eq!(result.accuracy.round(), 81.0);
        assert_eq!(result.generated_at, fixed_now());
        assert_eq!(result.metadata.periods, 2);
        assert_eq!(result.metadata.method, COMBINED_METHOD);
        assert_eq!(result.metadata.confidence_level, 90);
    }

    #[test]
    fn duplicate_dates_do_not_count_as_history() {
        let obs = vec![
            Observation::new(date(2024, 1, 1), 10),
            Observation::new(date(2024, 1, 1), 30),
        ];
        let err = generate_forecast(&obs, 3, ConfidenceLevel::P95).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { points: 1 });
    }

    #[test]
    fn empty_history_is_insufficient() {
        let err = generate_forecast(&[], 1, ConfidenceLevel::P95).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { points: 0 });
    }

    #[test]
    fn zero_periods_is_rejected() {
        let err = generate_forecast(&reference_history(), 0, ConfidenceLevel::P95).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }

    #[test]
    fn two_point_history_is_enough() {
        let obs = vec![
            Observation::new(date(2024, 1, 1), 12),
            Observation::new(date(2024, 1, 8), 18),
        ];
        let result = ForecastService::default()
            .generate_forecast_at(&obs, 3, ConfidenceLevel::P95, fixed_now())
            .unwrap();
        assert_eq!(result.points.len(), 3);
        assert_eq!(result.accuracy, 95.0);
        for p in &result.points {
            assert!(p.lower_bound <= p.predicted_value && p.predicted_value <= p.upper_bound);
        }
    }

    #[test]
    fn step_and_anchor_come_from_config() {
        let service = ForecastService::new(ForecastConfig {
            step_days: 1,
            trend_anchor: AnchorPolicy::Today,
            ..ForecastConfig::default()
        })
        .unwrap();

        let result = service
            .generate_forecast_at(&reference_history(), 3, ConfidenceLevel::P95, fixed_now())
            .unwrap();
        let dates: Vec<NaiveDate> = result.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 2), date(2024, 2, 3), date(2024, 2, 4)]
        );
    }

    #[test]
    fn moving_average_dates_count_from_request_day() {
        let service = ForecastService::default();
        let today = fixed_now().date_naive();
        let dates = service
            .dates_for(service.config().moving_average_anchor, date(2024, 1, 22), today, 3)
            .unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 2, 8), date(2024, 2, 15), date(2024, 2, 22)]
        );

        let trend_dates = service
            .dates_for(service.config().trend_anchor, date(2024, 1, 22), today, 2)
            .unwrap();
        assert_eq!(trend_dates, vec![date(2024, 1, 29), date(2024, 2, 5)]);
    }

    #[test]
    fn explosive_growth_serializes_as_numbers() {
        let obs = vec![
            Observation::new(date(2024, 1, 1), 1),
            Observation::new(date(2024, 1, 8), 1),
            Observation::new(date(2024, 1, 15), 200),
        ];
        let result = ForecastService::default()
            .generate_forecast_at(&obs, 200, ConfidenceLevel::P95, fixed_now())
            .unwrap();

        assert_eq!(result.points.len(), 200);
        let json = serde_json::to_value(&result).unwrap();
        for point in json["points"].as_array().unwrap() {
            assert!(point["predictedValue"].is_f64());
            assert!(point["lowerBound"].is_f64());
            assert!(point["upperBound"].is_f64());
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let err = ForecastService::new(ForecastConfig {
            step_days: -7,
            ..ForecastConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }
}
