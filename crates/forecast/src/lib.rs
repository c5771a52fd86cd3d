//! `stockcast-forecast`
//!
//! **Responsibility:** sales forecasting for a single product series.
//!
//! The engine is a pure function of its inputs:
//! - It never fetches, caches or persists sales data; callers hand it observations.
//! - Every call builds its own series and models; nothing is shared between calls.
//! - It blends an OLS trend with a damped moving average and reports the trend
//!   model's in-sample accuracy next to the forecast.

pub mod accuracy;
pub mod aggregate;
pub mod combine;
pub mod config;
pub mod error;
pub mod insight;
pub mod job;
pub mod model;
pub mod moving_average;
mod numeric;
pub mod schedule;
pub mod scheduler;
pub mod service;
pub mod trend;

pub use accuracy::estimate_trend_accuracy;
pub use aggregate::aggregate_observations;
pub use combine::combine_forecasts;
pub use config::{AnchorPolicy, ForecastConfig};
pub use error::ForecastError;
pub use insight::SalesInsight;
pub use job::{SalesForecastJob, SalesHistory};
pub use model::{
    AggregatedSeries, ConfidenceLevel, ForecastMetadata, ForecastPoint, ForecastResult, Observation,
    SeriesPoint,
};
pub use moving_average::MovingAverageModel;
pub use scheduler::{ForecastBatch, ProductFailure, TenantForecastScheduler};
pub use service::{generate_forecast, ForecastService, COMBINED_METHOD};
pub use trend::TrendModel;
