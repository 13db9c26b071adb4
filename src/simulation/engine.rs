//! Simulation orchestrator
//!
//! Owns the body collection, the trajectory tracker, the clock state, and
//! the render sink, and drives one physics step per `tick`. Timestamps are
//! injected as `f64` seconds so the hosting loop (and the tests) control
//! the clock; the engine itself never reads wall time.
//!
//! Scheduling contract: single-threaded and cooperative. `tick` is invoked
//! repeatedly by the host with no overlap, does no I/O, and never blocks.
//! Cancellation is simply ceasing to call it.

use log::warn;

use crate::colors::random_color;
use crate::error::SimError;
use crate::persistence::store::{read_state, write_state, BodyRecord};
use crate::render::{RenderSink, ShapeHandle};
use crate::simulation::forces::{net_force, PairwiseGravity};
use crate::simulation::params::{
    Limits, DEFAULT_G_FACTOR, FPS_REFRESH_INTERVAL, MAX_DELTA_TIME, TRAJECTORY_SAMPLE_INTERVAL,
};
use crate::simulation::states::{Body, BodyId, Vec2};
use crate::simulation::trajectory::TrajectoryTracker;

struct Entry {
    id: BodyId,
    body: Body,
    shape: ShapeHandle,
}

/// Frame-rate-independent clock.
///
/// `time_acc` collects wall-clock deltas, is clamped to [`MAX_DELTA_TIME`]
/// and then scaled by the speed factor to form the effective dt of a tick.
/// It is fully consumed every tick; there is no sub-stepping.
struct Clock {
    last_tick: Option<f64>,
    time_acc: f64,
    sample_timer: f64,
    paused: bool,
}

struct FpsCounter {
    frames: u32,
    refresh_timer: f64,
}

/// Defaults applied when a body is spawned interactively.
struct NewBodyDefaults {
    mass: f64,
    radius: f64,
    velocity: Vec2,
}

pub struct Simulation<S: RenderSink> {
    sink: S,
    limits: Limits,
    gravity: PairwiseGravity,
    bodies: Vec<Entry>,
    trajectories: TrajectoryTracker,
    next_id: u64,
    clock: Clock,
    speed_factor: u32,
    new_body: NewBodyDefaults,
    fps: FpsCounter,
}

impl<S: RenderSink> Simulation<S> {
    pub fn new(sink: S, limits: Limits) -> Self {
        let trajectories = TrajectoryTracker::new(limits.max_trajectory_points);
        Self {
            sink,
            gravity: PairwiseGravity::from_factor(DEFAULT_G_FACTOR),
            bodies: Vec::new(),
            trajectories,
            next_id: 0,
            clock: Clock {
                last_tick: None,
                time_acc: 0.0,
                sample_timer: TRAJECTORY_SAMPLE_INTERVAL,
                paused: false,
            },
            speed_factor: limits.clamp_speed_factor(5),
            new_body: NewBodyDefaults {
                mass: 100.0,
                radius: 10.0,
                velocity: Vec2::zeros(),
            },
            fps: FpsCounter {
                frames: 0,
                refresh_timer: FPS_REFRESH_INTERVAL,
            },
            limits,
        }
    }

    // ------------------------------------------------------------------
    // Body collection
    // ------------------------------------------------------------------

    /// Add a body after validating it against the configured limits.
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        position: Vec2,
        color: String,
        velocity: Vec2,
    ) -> Result<BodyId, SimError> {
        let mass = self.limits.validate_mass(mass)?;
        let radius = self.limits.validate_radius(radius)?;
        let velocity = self.limits.validate_init_velocity(velocity)?;
        let body = Body::new(mass, radius, position, color, velocity)?;
        Ok(self.insert(body))
    }

    /// Spawn a body at `position` using the configured new-body defaults
    /// and a random palette color.
    pub fn spawn_body_at(&mut self, position: Vec2) -> Result<BodyId, SimError> {
        self.add_body(
            self.new_body.mass,
            self.new_body.radius,
            position,
            random_color(),
            self.new_body.velocity,
        )
    }

    pub(crate) fn insert(&mut self, body: Body) -> BodyId {
        self.next_id += 1;
        let id = BodyId(self.next_id);
        let shape = self
            .sink
            .add_circle(body.position, body.radius(), &body.color);
        self.trajectories.register(id, body.color.clone());
        self.bodies.push(Entry { id, body, shape });
        id
    }

    /// Remove one body: trajectory teardown first, then the circle shape,
    /// then the entry itself.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(idx) = self.bodies.iter().position(|e| e.id == id) else {
            return false;
        };
        self.trajectories.remove(id, &mut self.sink);
        let entry = self.bodies.remove(idx);
        self.sink.remove_shape(entry.shape);
        true
    }

    /// Two-phase bulk clear: detach every body's render resources, then
    /// drop the collection in one go.
    pub fn remove_all_bodies(&mut self) {
        for entry in &self.bodies {
            self.trajectories.remove(entry.id, &mut self.sink);
            self.sink.remove_shape(entry.shape);
        }
        self.bodies.clear();
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|e| e.id == id).map(|e| &e.body)
    }

    pub fn body_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().map(|e| e.id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // ------------------------------------------------------------------
    // Clock and state machine
    // ------------------------------------------------------------------

    pub fn pause(&mut self) {
        self.clock.paused = true;
    }

    /// Resume and reset the clock to `now`, so the pause interval cannot
    /// be applied as one giant catch-up step.
    pub fn resume(&mut self, now: f64) {
        self.clock.paused = false;
        self.clock.last_tick = Some(now);
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    /// Advance the simulation by one frame.
    ///
    /// `now` is the host's current timestamp in seconds. The last-tick
    /// timestamp is refreshed unconditionally, paused or not, so a paused
    /// simulation can never inherit a stale delta on its next active tick.
    pub fn tick(&mut self, now: f64) -> Result<(), SimError> {
        let elapsed = now - self.clock.last_tick.unwrap_or(now);
        self.clock.last_tick = Some(now);
        self.update_fps(elapsed);

        if self.clock.paused {
            return Ok(());
        }

        self.clock.time_acc += elapsed;
        self.clock.sample_timer -= elapsed;
        // Clamp BEFORE scaling: a long stall is integrated as at most
        // MAX_DELTA_TIME of wall time, whatever the speed factor
        if self.clock.time_acc > MAX_DELTA_TIME {
            self.clock.time_acc = MAX_DELTA_TIME;
        }
        let dt = self.clock.time_acc * f64::from(self.speed_factor);

        if self.clock.sample_timer <= 0.0 {
            for entry in &self.bodies {
                self.trajectories
                    .sample(entry.id, entry.body.position, &mut self.sink);
            }
            // The faster the simulation runs, the more simulated distance
            // per wall second, so sample more often to keep trails smooth
            self.clock.sample_timer =
                TRAJECTORY_SAMPLE_INTERVAL / f64::from(self.speed_factor);
        }

        // Forces for ALL bodies from pre-tick positions, every ordered
        // pair contributing once, before any position moves
        let snapshot: Vec<&Body> = self.bodies.iter().map(|e| &e.body).collect();
        let forces: Vec<Vec2> = (0..snapshot.len())
            .map(|i| net_force(&self.gravity, i, &snapshot))
            .collect();
        drop(snapshot);

        for (entry, force) in self.bodies.iter_mut().zip(forces) {
            entry.body.apply_force(force, dt)?;
        }
        for entry in self.bodies.iter_mut() {
            entry.body.advance(dt);
        }

        for entry in &self.bodies {
            self.sink
                .update_shape_position(entry.shape, entry.body.bounding_box());
        }

        self.clock.time_acc = 0.0;
        Ok(())
    }

    fn update_fps(&mut self, elapsed: f64) {
        self.fps.refresh_timer -= elapsed;
        if self.fps.refresh_timer <= 0.0 {
            self.fps.refresh_timer = FPS_REFRESH_INTERVAL;
            let text = format!("Fps: {}", self.fps.frames);
            self.sink.set_status_text(&text);
            self.fps.frames = 0;
        }
        self.fps.frames += 1;
    }

    // ------------------------------------------------------------------
    // Configuration surface (driven by external widgets)
    // ------------------------------------------------------------------

    /// Clamped into [1, max_speed_factor]; out-of-range values are not an
    /// error, they saturate.
    pub fn set_speed_factor(&mut self, factor: u32) {
        self.speed_factor = self.limits.clamp_speed_factor(factor);
    }

    pub fn speed_factor(&self) -> u32 {
        self.speed_factor
    }

    /// Tune the force law: effective G becomes `G_VALUE * factor`.
    pub fn set_g_factor(&mut self, factor: f64) {
        self.gravity = PairwiseGravity::from_factor(factor);
    }

    pub fn set_trajectory_cap(&mut self, cap: usize) -> Result<(), SimError> {
        let cap = self.limits.validate_trajectory_cap(cap)?;
        self.trajectories.set_max_points(cap, &mut self.sink);
        Ok(())
    }

    pub fn trajectory_cap(&self) -> usize {
        self.trajectories.max_points()
    }

    pub fn set_new_body_mass(&mut self, mass: f64) -> Result<(), SimError> {
        self.new_body.mass = self.limits.validate_mass(mass)?;
        Ok(())
    }

    pub fn set_new_body_radius(&mut self, radius: f64) -> Result<(), SimError> {
        self.new_body.radius = self.limits.validate_radius(radius)?;
        Ok(())
    }

    pub fn set_new_body_velocity(&mut self, velocity: Vec2) -> Result<(), SimError> {
        self.new_body.velocity = self.limits.validate_init_velocity(velocity)?;
        Ok(())
    }

    pub fn new_body_mass(&self) -> f64 {
        self.new_body.mass
    }

    pub fn new_body_radius(&self) -> f64 {
        self.new_body.radius
    }

    pub fn new_body_velocity(&self) -> Vec2 {
        self.new_body.velocity
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn trajectories(&self) -> &TrajectoryTracker {
        &self.trajectories
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize every body as one JSON object per line.
    pub fn save_state<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_state(writer, self.bodies.iter().map(|e| &e.body))
    }

    /// Load bodies from a JSON-lines reader, best effort. Malformed lines
    /// and records that fail body validation are skipped with a warning;
    /// returns how many bodies were actually added.
    pub fn load_state<R: std::io::BufRead>(&mut self, reader: R) -> std::io::Result<usize> {
        let mut loaded = 0;
        for record in read_state(reader)? {
            match record.into_body() {
                Ok(body) => {
                    self.insert(body);
                    loaded += 1;
                }
                Err(err) => warn!("skipping persisted body: {err}"),
            }
        }
        Ok(loaded)
    }

    /// Snapshot of the current body states in persisted-record form.
    pub fn records(&self) -> Vec<BodyRecord> {
        self.bodies
            .iter()
            .map(|e| BodyRecord::from_body(&e.body))
            .collect()
    }
}
