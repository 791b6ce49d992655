use criterion::{Criterion, criterion_group, criterion_main};
use fund_chart_rs::api::{IntradayChartBuilder, TrendChartBuilder};
use fund_chart_rs::core::{IntradayPoint, TrendPoint, ValueBounds};
use std::hint::black_box;

const DAY_MS: i64 = 86_400_000;

fn intraday_session(samples: usize) -> Vec<IntradayPoint> {
    (0..samples)
        .map(|i| {
            let minutes = 9 * 60 + 30 + i;
            let value = 1.2345 + (i as f64 * 0.07).sin() * 0.02;
            IntradayPoint::new(
                format!("{:02}:{:02}", minutes / 60, minutes % 60),
                value,
                format!("{:.2}", (value / 1.2345 - 1.0) * 100.0),
            )
        })
        .collect()
}

fn trend_history(days: usize) -> Vec<TrendPoint> {
    (0..days)
        .map(|i| {
            let y = 1.0 + i as f64 * 0.0004 + (i as f64 * 0.3).cos() * 0.01;
            TrendPoint::new(1_704_067_200_000 + i as i64 * DAY_MS, y)
                .with_equity_return((i as f64 * 0.3).sin())
        })
        .collect()
}

fn bench_value_bounds_10k(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000).map(|i| 1.0 + (i as f64).sin() * 0.5).collect();

    c.bench_function("value_bounds_10k", |b| {
        b.iter(|| {
            let _ = ValueBounds::from_values(black_box(values.iter().copied()));
        })
    });
}

fn bench_intraday_option_full_session(c: &mut Criterion) {
    let builder = IntradayChartBuilder::new();
    let points = intraday_session(241);

    c.bench_function("intraday_option_full_session", |b| {
        b.iter(|| {
            let _ = builder
                .build(black_box(&points))
                .expect("intraday option should build");
        })
    });
}

fn bench_trend_option_five_years(c: &mut Criterion) {
    let builder = TrendChartBuilder::new();
    let points = trend_history(1_250);

    c.bench_function("trend_option_five_years", |b| {
        b.iter(|| {
            let option = builder
                .build(black_box(&points))
                .expect("trend option should build")
                .expect("series is renderable");
            let _ = option.to_json_contract_v1_pretty().expect("serialize");
        })
    });
}

criterion_group!(
    benches,
    bench_value_bounds_10k,
    bench_intraday_option_full_session,
    bench_trend_option_five_years
);
criterion_main!(benches);
