//! Queue Metric Benchmarks
//!
//! The M/M/S cost grows linearly with the server count because the Erlang
//! series is summed term by term; the M/M/1 formulas are constant time.
//!
//! Run with: cargo bench --bench queue_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queuecalc::config::{Scenario, ScenarioFile};
use queuecalc::{multi_server_metrics, single_server_metrics};

/// M/M/1 closed form, with and without Pn.
fn bench_single_server(c: &mut Criterion) {
    let mut group = c.benchmark_group("MM1");
    group.sample_size(100);
    group.confidence_level(0.95);

    group.bench_function("metrics", |b| {
        b.iter(|| single_server_metrics(black_box(9.0), black_box(12.0), None));
    });
    group.bench_function("metrics_with_pn", |b| {
        b.iter(|| single_server_metrics(black_box(9.0), black_box(12.0), Some(black_box(5))));
    });

    group.finish();
}

/// M/M/S at 90% utilization across server counts.
fn bench_multi_server(c: &mut Criterion) {
    let mut group = c.benchmark_group("MMS");
    group.sample_size(100);
    group.confidence_level(0.95);

    for s in [1u32, 10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("metrics", s), s, |b, &s| {
            let lambda = 0.9 * f64::from(s);
            b.iter(|| multi_server_metrics(black_box(lambda), black_box(1.0), black_box(s)));
        });
    }

    group.finish();
}

/// Batch evaluation of a scenario file.
fn bench_batch(c: &mut Criterion) {
    let scenarios = (1..=50u32)
        .map(|i| {
            Scenario::builder(format!("s{i}"))
                .rates(0.8 * f64::from(i), 1.0)
                .servers(i)
                .build()
        })
        .collect();
    let Ok(file) = ScenarioFile::from_scenarios(scenarios) else {
        return;
    };

    c.bench_function("batch_50_scenarios", |b| {
        b.iter(|| black_box(file.evaluate()));
    });
}

criterion_group!(
    benches,
    bench_single_server,
    bench_multi_server,
    bench_batch
);
criterion_main!(benches);
