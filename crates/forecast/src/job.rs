use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcast_core::{ProductId, TenantId};

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::insight::SalesInsight;
use crate::model::{ConfidenceLevel, Observation};
use crate::service::ForecastService;

/// Sales history of one product, as supplied by the sales read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesHistory {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub observations: Vec<Observation>,
}

/// Forecast future sales of a single product for a tenant.
///
/// Inputs are handed over by the caller; the job never fetches or persists data.
#[derive(Debug, Clone)]
pub struct SalesForecastJob {
    tenant_id: TenantId,
    input: SalesHistory,
    periods: usize,
    confidence_level: ConfidenceLevel,
    config: ForecastConfig,
    /// Pinned clock; `None` uses the time of `run`.
    now: Option<DateTime<Utc>>,
}

impl SalesForecastJob {
    pub fn new(tenant_id: TenantId, input: SalesHistory) -> Self {
        Self {
            tenant_id,
            input,
            periods: 4,
            confidence_level: ConfidenceLevel::P95,
            config: ForecastConfig::default(),
            now: None,
        }
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: ConfidenceLevel) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_config(mut self, config: ForecastConfig) -> Self {
        self.config = config;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn product_id(&self) -> ProductId {
        self.input.product_id
    }

    pub fn run(&self) -> Result<SalesInsight, ForecastError> {
        if self.input.tenant_id != self.tenant_id {
            return Err(ForecastError::invalid_input(format!(
                "sales history of product {} belongs to another tenant",
                self.input.product_id
            )));
        }

        debug!(
            tenant = %self.tenant_id,
            product = %self.input.product_id,
            observations = self.input.observations.len(),
            "running sales forecast job"
        );

        let forecast = ForecastService::new(self.config.clone())?.generate_forecast_at(
            &self.input.observations,
            self.periods,
            self.confidence_level,
            self.now.unwrap_or_else(Utc::now),
        )?;

        Ok(SalesInsight::new(self.tenant_id, self.input.product_id, forecast))
    }
}
