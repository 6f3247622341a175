//! Criterion benchmarks for the propagation simulator.
//! Mappers are built once per radius; only the event loop is timed.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geoscan::api::prepare;
use geoscan::geom3::special;
use geoscan::sim::NoopObserver;
use geoscan::{ScanCfg, UnfoldCfg};

fn bench_scan(c: &mut Criterion) {
    let cube = special::cube(1.0).unwrap();
    let mut group = c.benchmark_group("scan");
    for &radius in &[2.0f64, 3.0, 4.0] {
        let cfg = ScanCfg {
            radius,
            unfold: UnfoldCfg {
                budget: 6,
                ..UnfoldCfg::default()
            },
            ..ScanCfg::default()
        };
        let net = prepare(&cube, &cfg).unwrap();
        group.bench_with_input(BenchmarkId::new("cube_launch", radius), &net, |b, net| {
            b.iter_batched(
                || net.clone(),
                |mut net| net.launch(&mut NoopObserver).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
