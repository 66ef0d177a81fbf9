//! Drive a world for a fixed number of steps and keep every frame
//!
//! The recorder does no physics of its own: it validates the run settings,
//! calls `World::step` and copies the display state after each step.

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::simulation::states::{ParticleSnapshot, World};

/// Every particle's display state right after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: usize, // 1-based step index
    pub t: f64, // simulation time after the step
    pub particles: Vec<ParticleSnapshot>,
}

/// The frames of one run, in step order.
///
/// Never empty and read-only once built; replay it as often as needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    dt: f64,
    initial: Vec<ParticleSnapshot>,
    frames: Vec<Frame>,
}

impl Trajectory {
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// State before the first step (not part of `frames`)
    pub fn initial(&self) -> &[ParticleSnapshot] {
        &self.initial
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Step `world` `frame_count` times and record a frame after each step.
///
/// Errors with `InvalidParameter` (before touching the world) if
/// `frame_count <= 0` or `dt` is not a positive finite number.
pub fn run(world: &mut World, frame_count: i64, dt: f64) -> Result<Trajectory> {
    if frame_count <= 0 {
        return Err(Error::InvalidParameter(format!(
            "frame_count must be > 0, got {frame_count}"
        )));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "dt must be finite and > 0, got {dt}"
        )));
    }
    let frame_count = usize::try_from(frame_count)
        .map_err(|_| Error::InvalidParameter(format!("frame_count {frame_count} is too large")))?;

    let initial = world.snapshot();
    let mut frames = Vec::with_capacity(frame_count);
    let mut reflections = 0usize;
    for step in 1..=frame_count {
        reflections += world.step(dt)?.reflections;
        frames.push(Frame {
            step,
            t: world.time(),
            particles: world.snapshot(),
        });
    }

    debug!(
        "recorded {} frames (dt = {}), {} wall reflections, final KE = {:.4}",
        frames.len(),
        dt,
        reflections,
        world.kinetic_energy()
    );

    Ok(Trajectory {
        dt,
        initial,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::scenario::build_scenario;

    #[test]
    fn records_one_frame_per_step() {
        let mut world = build_scenario("fertility", 3).unwrap();
        let before = world.snapshot();
        let traj = run(&mut world, 5, 0.05).unwrap();

        assert_eq!(traj.len(), 5);
        assert!(!traj.is_empty());
        assert_eq!(traj.initial(), before.as_slice());
        assert_eq!(traj.frames()[0].step, 1);
        assert!((traj.frames()[0].t - 0.05).abs() < 1e-12);
        assert_eq!(traj.last().unwrap().particles, world.snapshot());
        // frame 1 is after the first step, not the initial layout
        assert_ne!(traj.frames()[0].particles, before);
        assert_eq!((&traj).into_iter().count(), 5);
    }

    #[test]
    fn bad_parameters_leave_world_untouched() {
        let mut world = build_scenario("contamination", 3).unwrap();
        let before = world.snapshot();
        for (n, dt) in [(0, 0.05), (10, 0.0), (-1, 0.05), (10, -0.1), (10, f64::INFINITY)] {
            let err = run(&mut world, n, dt).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "({n}, {dt})");
        }
        assert_eq!(world.snapshot(), before);
        assert_eq!(world.time(), 0.0);
    }
}
