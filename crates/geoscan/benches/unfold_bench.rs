//! Criterion benchmarks for the unfolding engine.
//! Focus: budget in {2, 4, 6, 8} on a cube and on random prisms.
//! Results land under target/criterion by default.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geoscan::geom3::{special, VertexId};
use geoscan::rand3::{random_prism, PrismParams, SideCount};
use geoscan::unfold::{build_adjacency, map_all, unfold_from};
use geoscan::UnfoldCfg;

fn bench_unfold(c: &mut Criterion) {
    let cube = special::cube(1.0).unwrap();
    let cube_adj = build_adjacency(&cube).unwrap();
    let params = PrismParams {
        sides: SideCount::Fixed(8),
        ..PrismParams::default()
    };

    let mut group = c.benchmark_group("unfold");
    for &budget in &[2usize, 4, 6, 8] {
        let cfg = UnfoldCfg {
            budget,
            ..UnfoldCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("cube_single_source", budget), &cfg, |b, cfg| {
            b.iter(|| unfold_from(&cube, &cube_adj, VertexId(0), cfg).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("prism8_all_sources", budget), &cfg, |b, cfg| {
            b.iter_batched(
                || {
                    let poly = random_prism(&params, 41).unwrap().polyhedron;
                    let adj = build_adjacency(&poly).unwrap();
                    (poly, adj)
                },
                |(poly, adj)| map_all(&poly, &adj, cfg).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");
    for &sides in &[4usize, 16, 64] {
        let poly = special::prism(sides, 1.0, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::new("prism", sides), &poly, |b, poly| {
            b.iter(|| build_adjacency(poly).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unfold, bench_adjacency);
criterion_main!(benches);
