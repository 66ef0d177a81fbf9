//! Physical constants and domain bounds of a world
//!
//! `WorldParams` holds the settings fixed for the lifetime of a `World`:
//! - coupling constants for the three force terms,
//! - per-step velocity damping,
//! - the rectangular domain `[0, width] x [0, height]`

use crate::error::{Error, Result};

/// Ceiling on each coupling constant; with `MAX_CHARGE` every term stays finite
pub const MAX_COUPLING: f64 = 1e12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub width: f64, // domain width
    pub height: f64, // domain height
    pub k_coulomb: f64, // electrostatic coupling
    pub k_repulsion: f64, // short-range (Pauli) repulsion strength
    pub k_soft: f64, // soft-soft attraction coupling
    pub damping: f64, // velocity multiplier per step, in (0, 1)
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            k_coulomb: 100.0,
            k_repulsion: 200.0,
            k_soft: 150.0,
            damping: 0.90,
        }
    }
}

impl WorldParams {
    /// Default constants on a `width` x `height` domain
    pub fn with_bounds(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the invariants a `World` relies on
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidParameter("width must be finite and > 0".into()));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidParameter("height must be finite and > 0".into()));
        }
        // strictly inside (0, 1) so kinetic energy always bleeds off
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "damping must lie in (0, 1), got {}",
                self.damping
            )));
        }
        for (name, k) in [
            ("k_coulomb", self.k_coulomb),
            ("k_repulsion", self.k_repulsion),
            ("k_soft", self.k_soft),
        ] {
            if !(k.is_finite() && (0.0..=MAX_COUPLING).contains(&k)) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must lie in [0, {MAX_COUPLING}], got {k}"
                )));
            }
        }
        Ok(())
    }
}
