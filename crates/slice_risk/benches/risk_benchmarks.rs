//! Criterion benchmarks for slice_risk report sections.
//!
//! Benchmarks cover:
//! - Risk metrics over growing histories
//! - Factor regression with one to ten factors
//! - Correlation clustering over wide asset tables
//! - Full report build, sequential against parallel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slice_core::types::{Date, DateTable, Frequency, ReturnSeries, TimeSeriesPoint, Weights};
use slice_risk::factor::run_factor_regression;
use slice_risk::metrics::compute_risk_metrics;
use slice_risk::rails::compute_correlation_cluster_flags;
use slice_risk::report::RiskReportBuilder;

/// Deterministic pseudo-returns in roughly [-2%, 2%].
fn synthetic_returns(n: usize, seed: usize) -> Vec<f64> {
    (0..n)
        .map(|t| (((t * 31 + seed * 17) % 101) as f64 - 50.0) * 0.0004)
        .collect()
}

fn start() -> Date {
    Date::from_ymd(2015, 1, 1).unwrap()
}

fn synthetic_series(n: usize) -> ReturnSeries {
    let points = synthetic_returns(n, 0)
        .into_iter()
        .enumerate()
        .map(|(i, v)| TimeSeriesPoint::new(start().add_days(i as i64), v))
        .collect();
    ReturnSeries::new("bench", Frequency::Daily, points).unwrap()
}

fn synthetic_table(n_rows: usize, n_cols: usize) -> DateTable {
    let columns: Vec<Vec<f64>> = (0..n_cols).map(|j| synthetic_returns(n_rows, j + 1)).collect();
    DateTable::new(
        (0..n_cols).map(|j| format!("X{}", j)).collect(),
        (0..n_rows)
            .map(|i| {
                (
                    start().add_days(i as i64),
                    columns.iter().map(|c| Some(c[i])).collect(),
                )
            })
            .collect(),
    )
    .unwrap()
}

/// Benchmark the metrics section.
fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_metrics");

    for n in [252, 1260, 5040] {
        let series = synthetic_series(n);
        group.bench_with_input(BenchmarkId::new("daily", n), &series, |b, series| {
            b.iter(|| compute_risk_metrics(black_box(series), 0.02, &[21, 63, 252]));
        });
    }

    group.finish();
}

/// Benchmark OLS factor regression.
fn bench_factor_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("factor_regression");
    let series = synthetic_series(1260);

    for k in [1, 3, 10] {
        let factors = synthetic_table(1260, k);
        group.bench_with_input(BenchmarkId::new("factors", k), &factors, |b, factors| {
            b.iter(|| run_factor_regression(black_box(&series), black_box(factors)));
        });
    }

    group.finish();
}

/// Benchmark correlation clustering.
fn bench_correlation_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_clusters");

    for n_assets in [10, 50, 100] {
        let table = synthetic_table(504, n_assets);
        group.bench_with_input(BenchmarkId::new("assets", n_assets), &table, |b, table| {
            b.iter(|| compute_correlation_cluster_flags(black_box(table), 0.8));
        });
    }

    group.finish();
}

/// Benchmark a full report build.
fn bench_report_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_build");

    let assets = synthetic_table(1260, 20);
    let weights = Weights::new(assets.column_names().iter().map(|n| (n.clone(), 0.05))).unwrap();
    let factors = synthetic_table(1260, 5);
    let portfolio = ReturnSeries::new(
        "book",
        Frequency::Daily,
        assets.weighted_row_sum(&weights).unwrap(),
    )
    .unwrap();

    for parallel in [false, true] {
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| {
                RiskReportBuilder::new(black_box(&portfolio))
                    .asset_returns(&assets)
                    .weights(&weights)
                    .factor_data(&factors)
                    .as_of(start())
                    .parallel(parallel)
                    .build()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_metrics,
    bench_factor_regression,
    bench_correlation_clusters,
    bench_report_build
);
criterion_main!(benches);
