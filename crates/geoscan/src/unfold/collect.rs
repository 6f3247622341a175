//! Distance collection and near-duplicate merging.

use std::collections::BTreeSet;

use crate::error::GeometryError;
use crate::geom3::VertexId;

/// Merge near-duplicates in an ascending sequence.
///
/// A value is kept only if it exceeds the last kept value by more than `eps`. The
/// baseline is `0.0`, so zero-length and sub-tolerance distances are dropped.
/// Idempotent on its own output.
pub fn dedup_sorted(values: &[f64], eps: f64) -> Vec<f64> {
    debug_assert!(values.windows(2).all(|w| w[0] <= w[1]), "input must be sorted");
    let mut out = Vec::with_capacity(values.len());
    let mut last = 0.0;
    for &v in values {
        if v - last > eps {
            out.push(v);
            last = v;
        }
    }
    out
}

/// Sort (total order) then `dedup_sorted`.
pub fn dedup_unsorted(values: &[f64], eps: f64) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    dedup_sorted(&sorted, eps)
}

/// Single-writer accumulator for one unfolding run.
///
/// Distances are kept as exact sets keyed by their bit pattern, which orders like the
/// value itself for non-negative finite floats.
#[derive(Clone, Debug)]
pub struct Collector {
    source: VertexId,
    sets: Vec<BTreeSet<u64>>,
    degeneracies: Vec<GeometryError>,
}

impl Collector {
    pub fn new(source: VertexId, vertex_count: usize) -> Self {
        Self {
            source,
            sets: vec![BTreeSet::new(); vertex_count],
            degeneracies: Vec::new(),
        }
    }

    /// Record a candidate geodesic length to `v`.
    #[inline]
    pub fn insert(&mut self, v: VertexId, dist: f64) {
        if dist.is_finite() && dist >= 0.0 {
            // +0.0 keeps the bit ordering monotone
            self.sets[v.0].insert((dist + 0.0).to_bits());
        }
    }

    pub fn record_degeneracy(&mut self, err: GeometryError) {
        self.degeneracies.push(err);
    }

    /// Raw (not yet merged) count of distinct values.
    pub fn total(&self) -> usize {
        self.sets.iter().map(BTreeSet::len).sum()
    }

    /// Freeze into a `Mapper`, merging near-duplicates per vertex.
    pub fn finish(self, dedup_eps: f64) -> Mapper {
        let data = self
            .sets
            .into_iter()
            .map(|set| {
                let sorted: Vec<f64> = set.into_iter().map(f64::from_bits).collect();
                dedup_sorted(&sorted, dedup_eps)
            })
            .collect();
        Mapper {
            source: self.source,
            data,
            degeneracies: self.degeneracies,
        }
    }
}

/// Frozen per-source distance sets: for each destination vertex, the distinct
/// candidate geodesic lengths from `source`, ascending.
#[derive(Clone, Debug)]
pub struct Mapper {
    pub source: VertexId,
    data: Vec<Vec<f64>>,
    /// Unfolding paths aborted on numerical degeneracy.
    pub degeneracies: Vec<GeometryError>,
}

impl Mapper {
    /// Build from explicit per-vertex lists (sorted and merged here).
    pub fn from_lists(source: VertexId, lists: Vec<Vec<f64>>, dedup_eps: f64) -> Self {
        Self {
            source,
            data: lists.iter().map(|l| dedup_unsorted(l, dedup_eps)).collect(),
            degeneracies: Vec::new(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn distances(&self, v: VertexId) -> &[f64] {
        &self.data[v.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &[f64])> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, d)| (VertexId(i), d.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    pub fn min_distance(&self) -> Option<f64> {
        self.data.iter().filter_map(|d| d.first().copied()).reduce(f64::min)
    }

    /// Re-apply merging with `eps` (no-op when already merged with the same `eps`).
    pub fn remerge(&mut self, eps: f64) {
        for d in self.data.iter_mut() {
            *d = dedup_sorted(d, eps);
        }
    }
}
