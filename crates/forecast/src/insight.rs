//! Per-product forecast insight.

use serde::{Deserialize, Serialize};

use stockcast_core::{ProductId, TenantId};

use crate::model::{ForecastPoint, ForecastResult};
use crate::numeric::saturate;

/// Sales forecast of one product, ready for a dashboard or a restock planner.
///
/// Read-only analysis: building one never touches sales or inventory state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInsight {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub forecast: ForecastResult,
}

impl SalesInsight {
    pub fn new(tenant_id: TenantId, product_id: ProductId, forecast: ForecastResult) -> Self {
        Self {
            tenant_id,
            product_id,
            forecast,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.forecast.accuracy
    }

    pub fn next_period(&self) -> Option<&ForecastPoint> {
        self.forecast.points.first()
    }

    /// Units expected to sell over the whole horizon.
    pub fn expected_units(&self) -> f64 {
        saturate(self.forecast.points.iter().map(|p| p.predicted_value).sum())
    }

    /// Units needed to cover the horizon if every period sells at its upper bound.
    pub fn peak_demand(&self) -> f64 {
        saturate(self.forecast.points.iter().map(|p| p.upper_bound).sum())
    }

    pub fn summary(&self) -> String {
        let next = self.next_period().map(|p| p.predicted_value).unwrap_or(0.0);
        format!(
            "product {} is expected to sell {next:.0} unit(s) next period and {:.0} over {} period(s), up to {:.0} at {}% confidence (accuracy {:.1}%)",
            self.product_id,
            self.expected_units(),
            self.forecast.metadata.periods,
            self.peak_demand(),
            self.forecast.metadata.confidence_level,
            self.accuracy()
        )
    }
}
