//! Build a running simulation from a scenario configuration
//!
//! Maps the YAML-facing config structs onto an initialized [`Simulation`]:
//! tuning knobs first, then the bodies. Scenario bodies bypass the
//! new-body widget limits (those bound interactive spawning, not authored
//! scenarios) but still go through `Body::new`, so non-positive mass or
//! radius is rejected.

use crate::colors::random_color;
use crate::configuration::config::ScenarioConfig;
use crate::error::SimError;
use crate::render::RenderSink;
use crate::simulation::engine::Simulation;
use crate::simulation::params::Limits;
use crate::simulation::states::{Body, Vec2};

pub fn build_simulation<S: RenderSink>(
    cfg: ScenarioConfig,
    sink: S,
) -> Result<Simulation<S>, SimError> {
    let mut sim = Simulation::new(sink, Limits::default());
    sim.set_g_factor(cfg.parameters.g_factor);
    sim.set_speed_factor(cfg.parameters.speed_factor);
    sim.set_trajectory_cap(cfg.parameters.trajectory_points)?;

    for bc in cfg.bodies {
        let color = bc.color.unwrap_or_else(random_color);
        let body = Body::new(
            bc.m,
            bc.radius,
            Vec2::new(bc.x[0], bc.x[1]),
            color,
            Vec2::new(bc.v[0], bc.v[1]),
        )?;
        sim.insert(body);
    }
    Ok(sim)
}
