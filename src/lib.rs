//! Two-dimensional charged-particle simulator for hard/soft (HSAB) ion chemistry.
//!
//! A named scenario builds a [`World`], [`run`] integrates it for a fixed number
//! of steps and returns the [`Trajectory`] an animation player replays.

pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{Error, Result};
pub use simulation::states::{Particle, ParticleSnapshot, Hardness, Mobility, World, NVec2};
pub use simulation::params::WorldParams;
pub use simulation::forces::{PairForce, ForceSet, Separation, Coulomb, ShortRangeRepulsion, SoftAttraction};
pub use simulation::integrator::{damped_euler_step, StepReport};
pub use simulation::scenario::{build_scenario, build_custom, ScenarioKind};
pub use simulation::recorder::{run, Frame, Trajectory};
pub use configuration::config::{SimulationConfig, WorldConfig, RunConfig, BodyConfig};
