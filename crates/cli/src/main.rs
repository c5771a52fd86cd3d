//! `stockcast` — forecast a sales series from a JSON request.
//!
//! Usage: `stockcast [REQUEST.json]` (reads stdin when no path is given).
//! The forecast is printed to stdout as JSON; logs go to stderr.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use stockcast_forecast::{ConfidenceLevel, ForecastConfig, ForecastService, Observation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastRequest {
    observations: Vec<Observation>,
    periods: usize,
    #[serde(default)]
    confidence_level: ConfidenceLevel,
}

fn main() -> Result<()> {
    stockcast_observability::init();

    let path = std::env::args().nth(1);
    let raw = read_input(path.as_deref())?;
    let request = parse_request(&raw)?;

    let service = ForecastService::new(ForecastConfig::from_env())
        .context("invalid forecast configuration")?;
    let result = service
        .generate_forecast(&request.observations, request.periods, request.confidence_level)
        .context("forecast failed")?;

    tracing::info!(
        points = result.points.len(),
        accuracy = result.accuracy,
        "forecast written to stdout"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("failed to read {p}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_request(raw: &str) -> Result<ForecastRequest> {
    serde_json::from_str(raw).context("malformed forecast request")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_default_confidence() {
        let req = parse_request(
            r#"{"observations":[{"date":"2024-01-01","quantity":10},{"date":"2024-01-08","quantity":20}],"periods":2}"#,
        )
        .unwrap();
        assert_eq!(req.observations.len(), 2);
        assert_eq!(req.periods, 2);
        assert_eq!(req.confidence_level, ConfidenceLevel::P95);
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let err = parse_request(r#"{"observations":[],"periods":1,"confidenceLevel":0}"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("confidence level"));
    }

    #[test]
    fn demo_request_produces_reference_forecast() {
        let req = parse_request(include_str!("../../../demos/reference_request.json")).unwrap();
        let result = ForecastService::default()
            .generate_forecast(&req.observations, req.periods, req.confidence_level)
            .unwrap();
        assert_eq!(result.points[0].predicted_value, 30.0);
        assert_eq!(result.points[1].predicted_value, 37.0);
    }
}
