//! Core state types for the ion simulation.
//!
//! - `Particle`: one charged body (position, velocity, fixed physical parameters)
//! - `World`: the particle arena plus the constants and force set acting on it
//! - `ParticleSnapshot`: the display-facing copy of a particle at one instant
//!
//! Particles live in a `Vec` whose index is the particle's slot. Slots are
//! assigned once in `World::new` and never change during a run.

use std::collections::HashSet;

use log::trace;
use nalgebra::Vector2;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{damped_euler_step, StepReport};
use crate::simulation::params::WorldParams;

pub type NVec2 = Vector2<f64>;

/// HSAB class of an ion's electron cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hardness {
    Hard, // small, rigid, ionic bonding
    Soft, // large, polarizable, covalent-like bonding
}

impl Hardness {
    pub fn is_hard(self) -> bool {
        self == Hardness::Hard
    }

    pub fn from_is_hard(is_hard: bool) -> Self {
        if is_hard {
            Hardness::Hard
        } else {
            Hardness::Soft
        }
    }
}

/// Whether the integrator moves a particle.
///
/// `Pinned` particles still exert (and feel) forces but keep their position.
/// Their mass then only feeds display and energy diagnostics, never motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mobility {
    #[default]
    Free,
    Pinned,
}

/// Largest accepted |charge|; keeps `k q_a q_b / r^2` finite at the distance floor
pub const MAX_CHARGE: f64 = 1e6;

/// One charged body.
///
/// Position and velocity are the mutable kinematic state. Everything else is
/// fixed at construction and only readable through getters.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: String, // unique label within a run, e.g. "Ca_3"
    kind: String, // display type label, e.g. "Ca²⁺"
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    charge: f64, // signed, non-zero, |q| <= MAX_CHARGE
    mass: f64, // > 0
    radius: f64, // interaction radius, > 0
    hardness: Hardness,
    mobility: Mobility,
}

impl Particle {
    /// Create a particle at rest after validating its parameters.
    ///
    /// Errors with `InvalidParameter` if mass or radius is non-positive,
    /// charge is zero or beyond `MAX_CHARGE`, or anything is NaN/inf.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        x: NVec2,
        charge: f64,
        mass: f64,
        radius: f64,
        hardness: Hardness,
    ) -> Result<Self> {
        let p = Self {
            id: id.into(),
            kind: kind.into(),
            x,
            v: NVec2::zeros(),
            charge,
            mass,
            radius,
            hardness,
            mobility: Mobility::Free,
        };
        p.validate()?;
        Ok(p)
    }

    /// Check every invariant the force model and integrator rely on
    pub fn validate(&self) -> Result<()> {
        let id = &self.id;
        if id.is_empty() {
            return Err(Error::InvalidParameter("particle id must not be empty".into()));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "{id}: mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "{id}: radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !(self.charge != 0.0 && self.charge.abs() <= MAX_CHARGE) {
            return Err(Error::InvalidParameter(format!(
                "{id}: charge must be non-zero with |q| <= {MAX_CHARGE}, got {}",
                self.charge
            )));
        }
        if !self.x.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParameter(format!("{id}: position must be finite")));
        }
        if !self.v.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParameter(format!("{id}: velocity must be finite")));
        }
        Ok(())
    }

    /// Set the initial velocity (validated as finite)
    pub fn with_velocity(mut self, v: NVec2) -> Result<Self> {
        self.v = v;
        self.validate()?;
        Ok(self)
    }

    /// Mark the particle as immovable
    pub fn pinned(mut self) -> Self {
        self.mobility = Mobility::Pinned;
        self.v = NVec2::zeros();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn hardness(&self) -> Hardness {
        self.hardness
    }

    pub fn mobility(&self) -> Mobility {
        self.mobility
    }

    pub fn is_pinned(&self) -> bool {
        self.mobility == Mobility::Pinned
    }

    /// 1/2 m |v|^2
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.v.norm_squared()
    }

    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            id: self.id.clone(),
            x: self.x.x,
            y: self.x.y,
            kind: self.kind.clone(),
            radius: self.radius,
            is_hard: self.hardness.is_hard(),
            charge: self.charge,
        }
    }
}

/// What the renderer needs to draw one particle at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSnapshot {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub radius: f64,
    pub is_hard: bool,
    pub charge: f64,
}

/// A closed box of interacting particles.
///
/// Owns the particle arena, the simulation time and the force set built
/// from its `WorldParams`. Only `step` mutates the particles.
#[derive(Debug)]
pub struct World {
    params: WorldParams,
    particles: Vec<Particle>,
    forces: ForceSet,
    t: f64,
}

impl World {
    /// Build a world after checking the parameters, every particle, id
    /// uniqueness and that every particle starts inside the domain.
    pub fn new(params: WorldParams, particles: Vec<Particle>) -> Result<Self> {
        params.validate()?;

        let mut seen = HashSet::with_capacity(particles.len());
        for p in &particles {
            // x and v are public, so re-check what may have changed since `Particle::new`
            p.validate()?;
            if !seen.insert(p.id.as_str()) {
                return Err(Error::InvalidParameter(format!("duplicate particle id {:?}", p.id)));
            }
            if !(0.0..=params.width).contains(&p.x.x) || !(0.0..=params.height).contains(&p.x.y) {
                return Err(Error::InvalidParameter(format!(
                    "{} starts outside the {}x{} domain at ({}, {})",
                    p.id, params.width, params.height, p.x.x, p.x.y
                )));
            }
        }

        let forces = ForceSet::from_params(&params);
        Ok(Self {
            params,
            particles,
            forces,
            t: 0.0,
        })
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Simulation time elapsed since construction
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Slot of the particle labelled `id`
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.particles.iter().position(|p| p.id == id)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Net force on every slot for the current positions
    pub fn net_forces(&self) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); self.particles.len()];
        self.forces.accumulate_forces(&self.particles, &mut out);
        out
    }

    pub fn snapshot(&self) -> Vec<ParticleSnapshot> {
        self.particles.iter().map(Particle::snapshot).collect()
    }

    /// Advance every particle by one step of length `dt`
    pub fn step(&mut self, dt: f64) -> Result<StepReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "dt must be finite and > 0, got {dt}"
            )));
        }
        let World {
            params,
            particles,
            forces,
            t,
        } = self;

        let report = damped_euler_step(particles, forces, params, dt);
        *t += dt;
        trace!("t = {:.4}: {} wall reflections", *t, report.reflections);
        Ok(report)
    }
}
