//! Batch forecasting for one tenant's catalog.
//!
//! Every product is forecast independently with the same settings and the same
//! clock. A product whose history cannot be forecast is recorded as a failure
//! and never stops the rest of the batch.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use stockcast_core::{ProductId, TenantId};

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::insight::SalesInsight;
use crate::job::{SalesForecastJob, SalesHistory};
use crate::model::ConfidenceLevel;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFailure {
    pub product_id: ProductId,
    pub error: ForecastError,
}

/// Outcome of one batch run, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBatch {
    pub generated_at: DateTime<Utc>,
    pub insights: Vec<SalesInsight>,
    pub failures: Vec<ProductFailure>,
}

impl ForecastBatch {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Insights ordered by expected units over the horizon, highest first.
    pub fn by_expected_demand(&self) -> Vec<&SalesInsight> {
        let mut ranked: Vec<&SalesInsight> = self.insights.iter().collect();
        ranked.sort_by(|a, b| b.expected_units().total_cmp(&a.expected_units()));
        ranked
    }
}

/// Runs sales forecasts for every product of a single tenant, on the calling thread.
#[derive(Debug, Clone)]
pub struct TenantForecastScheduler {
    tenant_id: TenantId,
    config: ForecastConfig,
    periods: usize,
    confidence_level: ConfidenceLevel,
    now: Option<DateTime<Utc>>,
}

impl TenantForecastScheduler {
    pub fn new(tenant_id: TenantId, config: ForecastConfig) -> Result<Self, ForecastError> {
        config.validate()?;
        Ok(Self {
            tenant_id,
            config,
            periods: 4,
            confidence_level: ConfidenceLevel::P95,
            now: None,
        })
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: ConfidenceLevel) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn run_batch(&self, histories: &[SalesHistory]) -> ForecastBatch {
        let generated_at = self.now.unwrap_or_else(Utc::now);
        let mut insights = Vec::with_capacity(histories.len());
        let mut failures = Vec::new();

        for history in histories {
            let job = SalesForecastJob::new(self.tenant_id, history.clone())
                .with_periods(self.periods)
                .with_confidence_level(self.confidence_level)
                .with_config(self.config.clone())
                .at(generated_at);

            match job.run() {
                Ok(insight) => insights.push(insight),
                Err(error) => {
                    warn!(
                        tenant = %self.tenant_id,
                        product = %history.product_id,
                        error = %error,
                        "sales forecast failed for product"
                    );
                    failures.push(ProductFailure {
                        product_id: history.product_id,
                        error,
                    });
                }
            }
        }

        info!(
            tenant = %self.tenant_id,
            products = histories.len(),
            forecast = insights.len(),
            failed = failures.len(),
            "sales forecast batch finished"
        );

        ForecastBatch {
            generated_at,
            insights,
            failures,
        }
    }
}
