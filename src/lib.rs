pub mod colors;
pub mod configuration;
pub mod error;
pub mod persistence;
pub mod render;
pub mod simulation;

pub use error::SimError;
pub use render::{BoundingBox, NullSink, RenderSink, ShapeHandle};

pub use simulation::engine::Simulation;
pub use simulation::forces::{net_force, ForceModel, PairwiseGravity};
pub use simulation::params::{Limits, G_VALUE, MAX_DELTA_TIME, TRAJECTORY_SAMPLE_INTERVAL};
pub use simulation::scenario::build_simulation;
pub use simulation::states::{distance_vector, try_div, Body, BodyId, Vec2};
pub use simulation::trajectory::TrajectoryTracker;

pub use configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};
pub use persistence::store::{read_state, write_state, BodyRecord};
