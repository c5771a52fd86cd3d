//! Observation aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{AggregatedSeries, Observation, SeriesPoint};

/// Collapse raw observations into one entry per date, ascending.
///
/// Input order is irrelevant. Quantities on the same date are summed (saturating).
pub fn aggregate_observations(observations: &[Observation]) -> AggregatedSeries {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for obs in observations {
        let total = by_date.entry(obs.date).or_insert(0);
        *total = total.saturating_add(obs.quantity);
    }

    let points = by_date
        .into_iter()
        .map(|(date, total_quantity)| SeriesPoint {
            date,
            total_quantity,
        })
        .collect();

    AggregatedSeries::from_sorted(points)
}
