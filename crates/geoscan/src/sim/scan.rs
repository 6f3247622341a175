//! The event loop.

use std::collections::BTreeSet;

use crate::cfg::{check_tick_range, SimCfg};
use crate::error::{InputError, ScanError};
use crate::geom3::VertexId;
use crate::unfold::Mapper;

use super::types::{Entry, NoopObserver, ScanObserver, ScanSummary};

/// Propagation simulator: one frozen `Mapper` per vertex, a time radius, arrival
/// counters and the live event set.
///
/// States: running while `entries` is non-empty, idle afterwards.
#[derive(Clone, Debug)]
pub struct ScanNet {
    maps: Vec<Mapper>,
    radius: f64,
    arrivals: Vec<u64>,
    entries: BTreeSet<Entry>,
    cfg: SimCfg,
    timestamp: u64,
    processed: u64,
}

impl ScanNet {
    /// Validate the inputs and seed the event set with `start` at time 0.
    ///
    /// `maps[i]` must have source `i` and cover every vertex. Mapper distances are
    /// positive, so every chain of arrivals ends at `radius`.
    pub fn new(
        maps: Vec<Mapper>,
        radius: f64,
        start: VertexId,
        cfg: SimCfg,
    ) -> Result<Self, ScanError> {
        cfg.validate()?;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(InputError::invalid_param("radius", radius, "must be finite and >= 0").into());
        }
        check_tick_range(radius, cfg.time_eps)?;
        let n = maps.len();
        if start.0 >= n {
            return Err(InputError::UnknownVertex {
                vertex: start.0,
                count: n,
            }
            .into());
        }
        for (i, m) in maps.iter().enumerate() {
            if m.source != VertexId(i) || m.vertex_count() != n {
                return Err(InputError::invalid_param(
                    "maps",
                    format!("#{i} (source {}, {} vertices)", m.source.0, m.vertex_count()),
                    "map i must have source i and cover every vertex",
                )
                .into());
            }
        }
        let mut entries = BTreeSet::new();
        entries.insert(Entry::new(start, 0.0, cfg.time_eps));
        tracing::debug!(vertices = n, radius, start = start.0, "simulation prepared");
        Ok(Self {
            maps,
            radius,
            arrivals: vec![0; n],
            entries,
            cfg,
            timestamp: 0,
            processed: 0,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn arrivals(&self) -> &[u64] {
        &self.arrivals
    }

    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline]
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Number of scheduled, unprocessed events.
    #[inline]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn maps(&self) -> &[Mapper] {
        &self.maps
    }

    /// Process the earliest event; `None` once idle.
    pub fn step(&mut self) -> Option<Entry> {
        self.step_with(&mut NoopObserver)
    }

    /// `step` with progress hooks.
    pub fn step_with<O: ScanObserver + ?Sized>(&mut self, obs: &mut O) -> Option<Entry> {
        let cur = self.entries.pop_first()?;
        while cur.time > self.timestamp as f64 {
            obs.on_timestamp(self.timestamp, &self.arrivals);
            self.timestamp += 1;
        }
        self.arrivals[cur.vertex.0] += 1;
        self.processed += 1;
        let map = &self.maps[cur.vertex.0];
        for (dest, ds) in map.iter() {
            for &d in ds {
                let time = cur.time + d;
                if time <= self.radius {
                    self.entries.insert(Entry::new(dest, time, self.cfg.time_eps));
                }
            }
        }
        obs.on_event(&cur, &self.arrivals);
        Some(cur)
    }

    /// Run until idle.
    ///
    /// With `SimCfg::max_events` set, fails with `EventBudget` when that many events
    /// were processed and more are still pending.
    pub fn launch<O: ScanObserver + ?Sized>(&mut self, obs: &mut O) -> Result<ScanSummary, ScanError> {
        while !self.entries.is_empty() {
            if let Some(limit) = self.cfg.max_events {
                if self.processed >= limit {
                    tracing::warn!(limit, pending = self.entries.len(), "event budget exhausted");
                    return Err(ScanError::EventBudget { limit });
                }
            }
            self.step_with(obs);
        }
        tracing::info!(
            processed = self.processed,
            timestamp = self.timestamp,
            "simulation complete"
        );
        Ok(self.summary())
    }

    /// Counters as of now.
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            processed: self.processed,
            timestamp: self.timestamp,
            arrivals: self.arrivals.clone(),
        }
    }
}
