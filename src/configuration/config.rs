//! Configuration types for loading simulation runs from YAML.
//!
//! This module defines a thin, `serde`-deserializable description of a run:
//!
//! - [`WorldConfig`]      – domain bounds and force constants
//! - [`RunConfig`]        – which scenario, seed, frame count and step size
//! - [`BodyConfig`]       – initial state of one body, for custom scenarios
//! - [`SimulationConfig`] – top-level wrapper loaded from a file
//!
//! Every field has a default, so any section (or the whole file) may be left out.
//!
//! # YAML format
//!
//! ```yaml
//! world:
//!   width: 15.0
//!   height: 15.0
//!   k_coulomb: 100.0        # electrostatic coupling
//!   k_repulsion: 200.0      # short-range repulsion
//!   k_soft: 150.0           # soft-soft attraction
//!   damping: 0.9            # velocity multiplier per step, in (0, 1)
//!
//! run:
//!   scenario: "contamination"
//!   seed: 42
//!   frames: 80
//!   dt: 0.05
//!
//! # Optional: replaces the named scenario with these bodies
//! bodies:
//!   - id: "Na_0"
//!     kind: "Na⁺"
//!     x: [ 5.0, 7.5 ]
//!     charge: 1.0
//!     mass: 23.0
//!     radius: 1.0
//!     hard: true
//!   - id: "Cl_0"
//!     x: [ 9.0, 7.5 ]
//!     v: [ -0.5, 0.0 ]
//!     charge: -1.0
//!     mass: 35.0
//!     radius: 1.8
//!     hard: false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::WorldParams;
use crate::simulation::scenario::SCENARIO_SIZE;

/// Domain and force constants
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub k_coulomb: f64,
    pub k_repulsion: f64,
    pub k_soft: f64,
    pub damping: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let p = WorldParams::with_bounds(SCENARIO_SIZE, SCENARIO_SIZE);
        Self {
            width: p.width,
            height: p.height,
            k_coulomb: p.k_coulomb,
            k_repulsion: p.k_repulsion,
            k_soft: p.k_soft,
            damping: p.damping,
        }
    }
}

impl WorldConfig {
    /// Runtime parameters; validated later by `World::new`
    pub fn to_params(&self) -> WorldParams {
        WorldParams {
            width: self.width,
            height: self.height,
            k_coulomb: self.k_coulomb,
            k_repulsion: self.k_repulsion,
            k_soft: self.k_soft,
            damping: self.damping,
        }
    }
}

/// What to run and for how long
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub scenario: String, // scenario identifier, ignored when `bodies` is given
    pub seed: u64, // seed for random placements
    pub frames: i64, // number of frames to record
    pub dt: f64, // fixed step size
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenario: "fertility".to_string(),
            seed: 42,
            frames: 80,
            dt: 0.05,
        }
    }
}

/// Initial state of one body in a custom scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub id: String, // unique label
    #[serde(default)]
    pub kind: Option<String>, // display label, defaults to the id
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity
    pub charge: f64,
    pub mass: f64,
    pub radius: f64,
    pub hard: bool, // `true` - hard (ionic), `false` - soft (polarizable)
    #[serde(default)]
    pub pinned: bool, // never moved by the integrator
}

/// Top-level run configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub run: RunConfig,
    pub bodies: Option<Vec<BodyConfig>>,
}

impl SimulationConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
