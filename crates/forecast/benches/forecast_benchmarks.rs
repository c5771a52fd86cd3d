use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stockcast_forecast::{aggregate_observations, ConfidenceLevel, ForecastService, Observation};

/// Weekly sales with a mild upward trend and a few same-day duplicates.
fn synthetic_history(weeks: usize) -> Vec<Observation> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap();
    let mut obs = Vec::with_capacity(weeks + weeks / 5);
    for w in 0..weeks {
        let date = start + Duration::days(7 * w as i64);
        let quantity = 50 + (w as u64 * 3) % 40 + w as u64 / 4;
        obs.push(Observation::new(date, quantity));
        if w % 5 == 0 {
            obs.push(Observation::new(date, 7));
        }
    }
    obs
}

fn bench_generate_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_forecast");
    let service = ForecastService::default();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    for weeks in [8usize, 52, 520, 5_200] {
        let history = synthetic_history(weeks);
        group.throughput(Throughput::Elements(history.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(weeks), &history, |b, history| {
            b.iter(|| {
                service
                    .generate_forecast_at(black_box(history), 12, ConfidenceLevel::P95, now)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let history = synthetic_history(5_200);
    c.bench_function("aggregate_observations/5200", |b| {
        b.iter(|| aggregate_observations(black_box(&history)))
    });
}

criterion_group!(benches, bench_generate_forecast, bench_aggregation);
criterion_main!(benches);
