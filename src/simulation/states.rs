//! Core state types for the 2D gravity simulation
//!
//! Defines:
//! - `Vec2` — nalgebra-backed 2D vector plus the two helpers the force
//!   law needs (`distance_vector`, `try_div`)
//! - `BodyId` — opaque stable identifier for a body inside a simulation
//! - `Body` — mass, radius, position, velocity, acceleration, color tag,
//!   and the two halves of its physics step

use nalgebra::Vector2;

use crate::error::SimError;
use crate::render::BoundingBox;

pub type Vec2 = Vector2<f64>;

/// Component-wise absolute difference between two points.
///
/// This is NOT a displacement vector: both components are non-negative.
/// The force law takes the magnitude of this vector as its separation
/// distance.
pub fn distance_vector(a: &Vec2, b: &Vec2) -> Vec2 {
    Vec2::new((a.x - b.x).abs(), (a.y - b.y).abs())
}

/// Scalar division that fails fast on a zero divisor instead of producing
/// infinities.
pub fn try_div(v: &Vec2, scalar: f64) -> Result<Vec2, SimError> {
    if scalar == 0.0 {
        return Err(SimError::DivisionByZero);
    }
    Ok(v / scalar)
}

/// Stable identifier assigned when a body enters the simulation.
///
/// Ids come from a monotonic counter and are never handed out twice, so a
/// retired id can never be confused with a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u64);

/// One simulated disc body.
///
/// Mass and radius are kept private so they stay strictly positive for the
/// whole lifetime of the body; everything else is plain state. The
/// acceleration field only carries the value computed by the most recent
/// [`Body::apply_force`] call, it is never integrated across ticks.
#[derive(Debug, Clone)]
pub struct Body {
    mass: f64,
    radius: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
    pub color: String,
}

impl Body {
    pub fn new(
        mass: f64,
        radius: f64,
        position: Vec2,
        color: String,
        velocity: Vec2,
    ) -> Result<Self, SimError> {
        if mass <= 0.0 {
            return Err(SimError::invalid("mass", "mass has to be a positive value"));
        }
        if radius <= 0.0 {
            return Err(SimError::invalid(
                "radius",
                "radius has to be a positive value",
            ));
        }
        Ok(Self {
            mass,
            radius,
            position,
            velocity,
            acceleration: Vec2::zeros(),
            color,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Rejects non-positive values; the previous mass is kept on error.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), SimError> {
        if mass <= 0.0 {
            return Err(SimError::invalid("mass", "mass has to be a positive value"));
        }
        self.mass = mass;
        Ok(())
    }

    /// Rejects non-positive values; the previous radius is kept on error.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), SimError> {
        if radius <= 0.0 {
            return Err(SimError::invalid(
                "radius",
                "radius has to be a positive value",
            ));
        }
        self.radius = radius;
        Ok(())
    }

    /// First half of the physics step: fold the net force into velocity.
    ///
    /// a = F / m, then v += a * dt. The mass check is defensive; the
    /// constructor and setter make a non-positive mass unreachable.
    pub fn apply_force(&mut self, force: Vec2, dt: f64) -> Result<(), SimError> {
        if self.mass <= 0.0 {
            return Err(SimError::InvalidMass);
        }
        self.acceleration = force / self.mass;
        self.velocity += self.acceleration * dt;
        Ok(())
    }

    /// Second half of the physics step: x += v * dt.
    ///
    /// Kept separate from [`Body::apply_force`] on purpose: the engine
    /// computes forces for ALL bodies from pre-update positions before
    /// advancing ANY position, so the update stays symmetric and
    /// order-independent.
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Axis-aligned box around the body center with half-extent radius/2,
    /// matching what the drawing layer expects for a circle update.
    pub fn bounding_box(&self) -> BoundingBox {
        let half = self.radius / 2.0;
        BoundingBox {
            min: Vec2::new(self.position.x - half, self.position.y - half),
            max: Vec2::new(self.position.x + half, self.position.y + half),
        }
    }
}
