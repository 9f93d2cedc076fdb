use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Days, NaiveDate};
use stockpilot_core::{ForecastPoint, ForecastSeries};
use stockpilot_inventory::{DecisionParameters, decide};

/// 90 days of gently varying demand, enough for every accepted lead time.
fn forecast_series() -> ForecastSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let points = (0..90u64)
        .map(|i| {
            let demand = 40.0 + 8.0 * ((i % 7) as f64) - 3.5 * ((i % 3) as f64);
            ForecastPoint::new(start + Days::new(i), demand).unwrap()
        })
        .collect();
    ForecastSeries::new(points).unwrap()
}

fn bench_decide(c: &mut Criterion) {
    let series = forecast_series();
    let mut group = c.benchmark_group("decide");

    for lead in [1i64, 5, 14, 90] {
        let params = DecisionParameters::new(250, lead);
        group.bench_with_input(BenchmarkId::new("lead_time_days", lead), &params, |b, p| {
            b.iter(|| decide(black_box(&series), black_box(p)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decide);
criterion_main!(benches);
