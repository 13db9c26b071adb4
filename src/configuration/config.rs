//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario is a thin, `serde`-deserializable description of a starting
//! state:
//!
//! - [`ParametersConfig`] – tuning knobs (gravity factor, speed, trails)
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   g_factor: 1.0           # multiplier on the built-in G constant
//!   speed_factor: 5         # simulated-time multiplier, clamped to limits
//!   trajectory_points: 750  # trail length cap per body
//!
//! bodies:
//!   - x: [ -300.0, 0.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 10000.0
//!     radius: 20.0
//!     color: "Yellow"
//!   - x: [ 300.0, 0.0 ]
//!     v: [ 0.0, 12.0 ]
//!     m: 1.0
//!     radius: 5.0           # color omitted -> random palette pick
//! ```

use serde::Deserialize;

fn default_g_factor() -> f64 {
    1.0
}

fn default_speed_factor() -> u32 {
    5
}

fn default_trajectory_points() -> usize {
    750
}

/// Tuning knobs applied to the engine before any body is added.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_g_factor")]
    pub g_factor: f64, // effective G = G_VALUE * g_factor
    #[serde(default = "default_speed_factor")]
    pub speed_factor: u32, // clamped into [1, max] by the engine
    #[serde(default = "default_trajectory_points")]
    pub trajectory_points: usize, // trail cap, floor of 1
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g_factor: default_g_factor(),
            speed_factor: default_speed_factor(),
            trajectory_points: default_trajectory_points(),
        }
    }
}

/// Initial state for a single body.
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: [f64; 2],               // initial position
    pub v: [f64; 2],               // initial velocity
    pub m: f64,                    // mass, must be positive
    pub radius: f64,               // disc radius, must be positive
    pub color: Option<String>,     // omitted -> random palette color
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
