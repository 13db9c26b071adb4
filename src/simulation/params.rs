//! Physical constants and the `Limits` value object
//!
//! `Limits` replaces scattered per-setter range checks with one named
//! bundle of bounds and one validation entry point per field. All
//! validation returns a typed `SimError` and leaves prior state untouched.

use crate::error::SimError;
use crate::simulation::states::Vec2;

/// Base gravitational constant of the simplified force law.
pub const G_VALUE: f64 = 0.004;

/// Default multiplier on [`G_VALUE`].
pub const DEFAULT_G_FACTOR: f64 = 1.0;

/// Ceiling on the per-tick accumulated delta, in seconds. Equivalent to a
/// floor of 20 physics updates per second: a longer stall is integrated as
/// if only this much time had passed, bounding the integration error.
pub const MAX_DELTA_TIME: f64 = 1.0 / 20.0;

/// Wall-clock seconds between trajectory samples at speed factor 1.
pub const TRAJECTORY_SAMPLE_INTERVAL: f64 = 0.2;

/// Seconds between FPS counter refreshes on the status bar.
pub const FPS_REFRESH_INTERVAL: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Limits {
    pub max_speed_factor: u32,
    pub max_body_mass: f64,
    pub max_body_radius: f64,
    pub min_init_velocity: f64,
    pub max_init_velocity: f64,
    pub min_trajectory_points: usize,
    pub max_trajectory_points: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_speed_factor: 40,
            max_body_mass: 1e6,
            max_body_radius: 40.0,
            min_init_velocity: -30.0,
            max_init_velocity: 30.0,
            min_trajectory_points: 1,
            max_trajectory_points: 750,
        }
    }
}

impl Limits {
    /// Mass for a new body: (0, max_body_mass].
    pub fn validate_mass(&self, mass: f64) -> Result<f64, SimError> {
        if mass <= 0.0 {
            return Err(SimError::invalid("mass", "mass cannot be less than 0"));
        }
        if mass > self.max_body_mass {
            return Err(SimError::invalid(
                "mass",
                format!("mass cannot be greater than {}", self.max_body_mass),
            ));
        }
        Ok(mass)
    }

    /// Radius for a new body: (0, max_body_radius].
    pub fn validate_radius(&self, radius: f64) -> Result<f64, SimError> {
        if radius <= 0.0 {
            return Err(SimError::invalid("radius", "radius cannot be less than 0"));
        }
        if radius > self.max_body_radius {
            return Err(SimError::invalid(
                "radius",
                format!("radius cannot be greater than {}", self.max_body_radius),
            ));
        }
        Ok(radius)
    }

    /// Initial velocity for a new body: each axis within
    /// [min_init_velocity, max_init_velocity].
    pub fn validate_init_velocity(&self, v: Vec2) -> Result<Vec2, SimError> {
        let (lo, hi) = (self.min_init_velocity, self.max_init_velocity);
        if v.x < lo || v.y < lo || v.x > hi || v.y > hi {
            return Err(SimError::invalid(
                "initial velocity",
                format!("initial velocity is out of range [{lo}, {hi}]"),
            ));
        }
        Ok(v)
    }

    /// Trajectory point cap: at least min_trajectory_points (floor of 1).
    pub fn validate_trajectory_cap(&self, cap: usize) -> Result<usize, SimError> {
        if cap < self.min_trajectory_points {
            return Err(SimError::invalid(
                "trajectory cap",
                format!(
                    "trajectory cap cannot be lower than {}",
                    self.min_trajectory_points
                ),
            ));
        }
        Ok(cap)
    }

    /// Speed factor is clamped, never rejected.
    pub fn clamp_speed_factor(&self, factor: u32) -> u32 {
        factor.clamp(1, self.max_speed_factor)
    }
}
