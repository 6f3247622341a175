//! Tolerances and run parameters.
//!
//! Two independent tolerances: `dedup_eps` merges near-equal geodesic lengths,
//! `time_eps` collapses near-simultaneous events and is the coarser of the two.

use crate::error::InputError;
use crate::geom3::VertexId;

/// Largest `radius / time_eps` for which event ticks stay exact integers.
pub const MAX_TICKS: f64 = 9_007_199_254_740_992.0; // 2^53

/// How a laid face decides what the source sees through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// A new vertex is visible iff it lies inside the wedge of the hinge just
    /// crossed and beyond that hinge; a hinge is crossed iff one of its endpoints
    /// is visible.
    #[default]
    Hinge,
    /// The wedge is intersected with every wedge crossed before it; a hinge is
    /// crossed iff that intersection is non-empty. Recorded lengths never
    /// undercut the geodesic.
    Cumulative,
}

/// `radius` and `time_eps` must keep every tick below `MAX_TICKS`.
pub(crate) fn check_tick_range(radius: f64, time_eps: f64) -> Result<(), InputError> {
    if radius / time_eps > MAX_TICKS {
        return Err(InputError::invalid_param(
            "radius",
            radius,
            "radius / time_eps exceeds the event tick range",
        ));
    }
    Ok(())
}

/// Unfolding parameters.
#[derive(Clone, Copy, Debug)]
pub struct UnfoldCfg {
    /// Maximum number of face layouts along one unfolding path (the source face counts).
    pub budget: usize,
    /// Distances closer than this to the last kept value are merged.
    pub dedup_eps: f64,
    /// Radicands in `(-sqrt_slack, 0)` are clamped to zero instead of reported.
    pub sqrt_slack: f64,
    /// Hinges whose segment lies entirely beyond this distance are not crossed.
    pub max_distance: Option<f64>,
    pub visibility: Visibility,
}

impl Default for UnfoldCfg {
    fn default() -> Self {
        Self {
            budget: 25,
            dedup_eps: 1e-5,
            sqrt_slack: 1e-9,
            max_distance: None,
            visibility: Visibility::Hinge,
        }
    }
}

/// Simulator parameters.
#[derive(Clone, Copy, Debug)]
pub struct SimCfg {
    /// Event times within this band are treated as simultaneous.
    pub time_eps: f64,
    /// Abort after this many processed events (no limit by default).
    pub max_events: Option<u64>,
}

impl Default for SimCfg {
    fn default() -> Self {
        Self {
            time_eps: 1e-4,
            max_events: None,
        }
    }
}

/// Full run configuration.
#[derive(Clone, Copy, Debug)]
pub struct ScanCfg {
    pub start: VertexId,
    pub radius: f64,
    pub unfold: UnfoldCfg,
    pub sim: SimCfg,
}

impl Default for ScanCfg {
    fn default() -> Self {
        Self {
            start: VertexId(0),
            radius: 25.0,
            unfold: UnfoldCfg::default(),
            sim: SimCfg::default(),
        }
    }
}

impl UnfoldCfg {
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.dedup_eps.is_finite() && self.dedup_eps > 0.0) {
            return Err(InputError::invalid_param(
                "dedup_eps",
                self.dedup_eps,
                "must be finite and > 0",
            ));
        }
        if !(self.sqrt_slack.is_finite() && self.sqrt_slack >= 0.0) {
            return Err(InputError::invalid_param(
                "sqrt_slack",
                self.sqrt_slack,
                "must be finite and >= 0",
            ));
        }
        if let Some(d) = self.max_distance {
            if d.is_nan() || d < 0.0 {
                return Err(InputError::invalid_param(
                    "max_distance",
                    d,
                    "must be >= 0",
                ));
            }
        }
        Ok(())
    }
}

impl SimCfg {
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.time_eps.is_finite() && self.time_eps > 0.0) {
            return Err(InputError::invalid_param(
                "time_eps",
                self.time_eps,
                "must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl ScanCfg {
    /// Check parameters against a polyhedron with `vertex_count` vertices.
    pub fn validate(&self, vertex_count: usize) -> Result<(), InputError> {
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(InputError::invalid_param(
                "radius",
                self.radius,
                "must be finite and >= 0",
            ));
        }
        if self.start.0 >= vertex_count {
            return Err(InputError::UnknownVertex {
                vertex: self.start.0,
                count: vertex_count,
            });
        }
        self.unfold.validate()?;
        self.sim.validate()?;
        check_tick_range(self.radius, self.sim.time_eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = ScanCfg::default();
        assert_eq!(cfg.start, VertexId(0));
        assert_eq!(cfg.radius, 25.0);
        assert_eq!(cfg.unfold.budget, 25);
        assert_eq!(cfg.unfold.dedup_eps, 1e-5);
        assert_eq!(cfg.sim.time_eps, 1e-4);
        assert_eq!(cfg.unfold.visibility, Visibility::Hinge);
        assert!(cfg.validate(1).is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut cfg = ScanCfg::default();
        assert!(matches!(
            cfg.validate(0),
            Err(InputError::UnknownVertex { vertex: 0, count: 0 })
        ));
        cfg.radius = f64::NAN;
        assert!(cfg.validate(4).is_err());
        cfg.radius = 1.0;
        cfg.sim.time_eps = 0.0;
        assert!(cfg.validate(4).is_err());
        cfg.sim.time_eps = 1e-4;
        cfg.unfold.dedup_eps = -1.0;
        assert!(cfg.validate(4).is_err());
    }

    #[test]
    fn rejects_radius_beyond_tick_range() {
        let mut cfg = ScanCfg {
            radius: 1e11,
            ..ScanCfg::default()
        };
        assert!(cfg.validate(1).is_ok());
        cfg.radius = 1e15;
        assert!(matches!(
            cfg.validate(1),
            Err(InputError::InvalidParameter { name: "radius", .. })
        ));
        cfg.sim.time_eps = 1.0;
        assert!(cfg.validate(1).is_ok());
    }
}
