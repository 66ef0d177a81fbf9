//! Pairwise force terms for the ion simulation
//!
//! Each term implements [`PairForce`] and reports a signed pull along the
//! separation direction of a pair. [`ForceSet`] sums the active terms and
//! scatters the result onto a per-slot force buffer.

use std::fmt::Debug;

use crate::simulation::params::WorldParams;
use crate::simulation::states::{Hardness, NVec2, Particle};

/// Floor on the pair distance; keeps every term finite when particles overlap
pub const MIN_DISTANCE: f64 = 0.1;

/// Fraction of the summed radii at which two particles count as touching
pub const CONTACT_FACTOR: f64 = 0.8;

/// Outer edge of the soft-attraction band, in multiples of the contact distance
pub const SOFT_RANGE_FACTOR: f64 = 3.0;

/// Geometry shared by every term for one pair (a, b)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub d: NVec2, // displacement b - a
    pub r: f64, // |d| clamped to MIN_DISTANCE
    pub u: NVec2, // d / r, zero when a and b coincide
    pub contact: f64, // CONTACT_FACTOR * (radius_a + radius_b)
}

impl Separation {
    pub fn between(a: &Particle, b: &Particle) -> Self {
        let d = b.x - a.x;
        let r = d.norm().max(MIN_DISTANCE);
        Self {
            d,
            r,
            u: d / r,
            contact: CONTACT_FACTOR * (a.radius() + b.radius()),
        }
    }
}

/// A single interaction law between two particles.
///
/// `pull` returns the signed magnitude of the force on `a` along `sep.u`:
/// positive draws `a` toward `b`, negative pushes it away. The force on `b`
/// is always the exact negation.
pub trait PairForce: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn pull(&self, a: &Particle, b: &Particle, sep: &Separation) -> f64;
}

/// Inverse-square electrostatics, `-k q_a q_b / r^2`
#[derive(Debug, Clone, Copy)]
pub struct Coulomb {
    pub k: f64,
}

impl PairForce for Coulomb {
    fn name(&self) -> &'static str {
        "coulomb"
    }

    fn pull(&self, a: &Particle, b: &Particle, sep: &Separation) -> f64 {
        // q_a q_b < 0 gives a positive pull (attraction)
        -self.k * a.charge() * b.charge() / (sep.r * sep.r)
    }
}

/// Steric/Pauli exclusion, `k / r^4` pushing apart inside the contact distance
#[derive(Debug, Clone, Copy)]
pub struct ShortRangeRepulsion {
    pub k: f64,
}

impl PairForce for ShortRangeRepulsion {
    fn name(&self) -> &'static str {
        "repulsion"
    }

    fn pull(&self, _a: &Particle, _b: &Particle, sep: &Separation) -> f64 {
        if sep.r >= sep.contact {
            return 0.0;
        }
        let r2 = sep.r * sep.r;
        -self.k / (r2 * r2)
    }
}

/// Covalent-like glue between oppositely charged soft ions.
///
/// Only acts in the open band `(contact, 3 * contact)`: close, but not overlapping.
#[derive(Debug, Clone, Copy)]
pub struct SoftAttraction {
    pub k: f64,
}

impl SoftAttraction {
    /// Whether the hardness, charge and distance gates are all open for this pair
    pub fn engaged(a: &Particle, b: &Particle, sep: &Separation) -> bool {
        a.hardness() == Hardness::Soft
            && b.hardness() == Hardness::Soft
            && a.charge() * b.charge() < 0.0
            && sep.r > sep.contact
            && sep.r < SOFT_RANGE_FACTOR * sep.contact
    }
}

impl PairForce for SoftAttraction {
    fn name(&self) -> &'static str {
        "soft"
    }

    fn pull(&self, a: &Particle, b: &Particle, sep: &Separation) -> f64 {
        if !Self::engaged(a, b, sep) {
            return 0.0;
        }
        self.k / (sep.r * sep.r)
    }
}

/// Collection of pair force terms.
/// Their pulls are summed into one force vector per pair.
#[derive(Debug, Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn PairForce>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: PairForce + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Coulomb + short-range repulsion + soft attraction with the world's constants
    pub fn from_params(params: &WorldParams) -> Self {
        Self::new()
            .with(Coulomb { k: params.k_coulomb })
            .with(ShortRangeRepulsion { k: params.k_repulsion })
            .with(SoftAttraction { k: params.k_soft })
    }

    pub fn term_names(&self) -> Vec<&'static str> {
        self.terms.iter().map(|t| t.name()).collect()
    }

    /// Force on `a` exerted by `b`; zero when the two coincide
    pub fn pair_force(&self, a: &Particle, b: &Particle) -> NVec2 {
        let sep = Separation::between(a, b);
        if sep.d == NVec2::zeros() {
            return NVec2::zeros();
        }
        let pull: f64 = self.terms.iter().map(|t| t.pull(a, b, &sep)).sum();
        pull * sep.u
    }

    /// Net force on every particle.
    /// - `out[i]` is overwritten with the sum over all partners of slot `i`
    /// - every unordered pair is evaluated once and applied with opposite signs
    pub fn accumulate_forces(&self, particles: &[Particle], out: &mut [NVec2]) {
        debug_assert_eq!(particles.len(), out.len());
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }

        let n = particles.len();
        for i in 0..n {
            let pi = &particles[i];
            for j in (i + 1)..n {
                let f = self.pair_force(pi, &particles[j]);
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
