//! Fixed-step time integrator for the ion world
//!
//! Semi-implicit Euler with multiplicative velocity damping and elastic
//! reflection off the four walls of the domain.

use super::forces::ForceSet;
use super::params::WorldParams;
use super::states::{NVec2, Particle};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub reflections: usize, // velocity components flipped by a wall
}

/// Advance all particles by one step of length `dt`.
///
/// 1. net force per slot into a buffer owned by this call
/// 2. v = (v + F/m dt) * damping
/// 3. x = x + v dt, clamped to the domain with the offending velocity
///    component inverted
///
/// Pinned particles take part in step 1 only. `dt` is assumed validated.
pub fn damped_euler_step(
    particles: &mut [Particle],
    forces: &ForceSet,
    params: &WorldParams,
    dt: f64,
) -> StepReport {
    let mut report = StepReport::default();
    let n = particles.len();
    if n == 0 {
        return report;
    }

    // F_n for every slot at the current positions
    let mut net = vec![NVec2::zeros(); n];
    forces.accumulate_forces(particles, &mut net);

    let bounds = [params.width, params.height];
    for (p, f) in particles.iter_mut().zip(net.iter()) {
        if p.is_pinned() {
            continue;
        }

        // Kick with damping: v_n+1 = (v_n + a_n dt) * damping
        let a = *f / p.mass();
        p.v = (p.v + a * dt) * params.damping;

        // Drift from the damped velocity, reflecting off walls
        let mut x = p.x + p.v * dt;
        for k in 0..2 {
            if x[k] < 0.0 {
                x[k] = 0.0;
                p.v[k] = -p.v[k];
                report.reflections += 1;
            } else if x[k] > bounds[k] {
                x[k] = bounds[k];
                p.v[k] = -p.v[k];
                report.reflections += 1;
            }
        }
        p.x = x;
    }

    report
}
