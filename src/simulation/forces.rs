//! Pairwise force law
//!
//! Defines the [`ForceModel`] trait and the simplified gravitational
//! attraction used by the engine. The engine sums `force_between` over all
//! ordered pairs, O(n²) per tick.

use crate::simulation::params::G_VALUE;
use crate::simulation::states::{distance_vector, Body, Vec2};

/// Pairwise force source. `force_between(a, b)` is the force exerted ON
/// `a` BY `b`; the engine accumulates it over every other body.
pub trait ForceModel {
    fn force_between(&self, a: &Body, b: &Body) -> Vec2;
}

/// Simplified gravitational attraction, linear in 1/dist.
///
/// This is deliberately NOT the inverse-square Newtonian law: the force
/// magnitude is `g * m_a * m_b / dist`, with `dist` the magnitude of the
/// component-wise absolute separation. Changing it to 1/dist² would
/// measurably alter every trajectory, so the linear law is part of the
/// contract.
pub struct PairwiseGravity {
    pub g: f64,
}

impl PairwiseGravity {
    /// Build from a multiplier on the global [`G_VALUE`].
    pub fn from_factor(factor: f64) -> Self {
        Self {
            g: G_VALUE * factor,
        }
    }
}

impl ForceModel for PairwiseGravity {
    fn force_between(&self, a: &Body, b: &Body) -> Vec2 {
        // delta keeps its sign and orients the force; dist only scales it
        let delta = b.position - a.position;
        let mut dist = distance_vector(&a.position, &b.position).norm();

        // Collision-proximity floor: once the separation drops below the
        // radius sum, the force is computed AS IF the bodies were exactly
        // touching. This clamp is what keeps the division below safe;
        // positive radii make dist > 0 here.
        let floor = a.radius() + b.radius();
        if dist < floor {
            dist = floor;
        }
        if dist == 0.0 {
            // Coincident point bodies with zero combined radius. Body
            // construction forbids zero radii, so this is unreachable in
            // any real configuration.
            return Vec2::zeros();
        }

        let f = self.g * a.mass() * b.mass() / dist;
        Vec2::new(f * delta.x / dist, f * delta.y / dist)
    }
}

/// Net force on `bodies[target]` from every other body in the slice.
pub fn net_force(model: &dyn ForceModel, target: usize, bodies: &[&Body]) -> Vec2 {
    let mut total = Vec2::zeros();
    for (i, other) in bodies.iter().enumerate() {
        if i != target {
            total += model.force_between(bodies[target], other);
        }
    }
    total
}
