//! Build ready-to-run worlds for the soil chemistry experiments
//!
//! Three named scenarios are recognized:
//! - `Fertility`: hard Ca²⁺ and CO₃²⁻ ions, which crystallize into a lattice
//! - `Contamination`: soft Hg²⁺ and S²⁻ ions, which clump together
//! - `Competition`: a pinned row of clay anions with hard K⁺ and soft Pb²⁺
//!   invaders competing for the surface
//!
//! The particle count, species and parameters are fixed per scenario. Positions
//! are drawn from a `StdRng` seeded by the caller, so the same identifier and
//! seed always give the same world.
//!
//! Worlds can also be built from an explicit body list (`build_custom`), as
//! loaded from a YAML config.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, WorldConfig};
use crate::error::{Error, Result};
use crate::simulation::params::WorldParams;
use crate::simulation::states::{Hardness, NVec2, Particle, World};

/// Side length of the square domain used by the named scenarios
pub const SCENARIO_SIZE: f64 = 15.0;

/// Random placements stay this far from every wall
const MARGIN: f64 = 2.0;

/// One ion species: everything but position is shared by its particles
#[derive(Debug, Clone, Copy)]
struct Species {
    prefix: &'static str, // id prefix, "Ca" -> "Ca_0", "Ca_1", ...
    label: &'static str,
    charge: f64,
    radius: f64,
    mass: f64,
    hardness: Hardness,
}

impl Species {
    fn spawn(&self, i: usize, x: NVec2) -> Result<Particle> {
        Particle::new(
            format!("{}_{}", self.prefix, i),
            self.label,
            x,
            self.charge,
            self.mass,
            self.radius,
            self.hardness,
        )
    }
}

const CALCIUM: Species = Species { prefix: "Ca", label: "Ca²⁺", charge: 2.0, radius: 0.6, mass: 40.0, hardness: Hardness::Hard };
const CARBONATE: Species = Species { prefix: "CO3", label: "CO₃²⁻", charge: -2.0, radius: 0.7, mass: 60.0, hardness: Hardness::Hard };
const MERCURY: Species = Species { prefix: "Hg", label: "Hg²⁺", charge: 2.0, radius: 0.8, mass: 200.0, hardness: Hardness::Soft };
const SULFIDE: Species = Species { prefix: "S", label: "S²⁻", charge: -2.0, radius: 0.9, mass: 32.0, hardness: Hardness::Soft };
// English form of the Spanish "Arcilla⁻" label
const CLAY: Species = Species { prefix: "Clay", label: "Clay⁻", charge: -1.0, radius: 1.0, mass: 1000.0, hardness: Hardness::Hard };
const POTASSIUM: Species = Species { prefix: "K", label: "K⁺", charge: 1.0, radius: 0.7, mass: 39.0, hardness: Hardness::Hard };
const LEAD: Species = Species { prefix: "Pb", label: "Pb²⁺", charge: 2.0, radius: 0.9, mass: 207.0, hardness: Hardness::Soft };

const ION_PAIRS: usize = 8; // cation/anion pairs in the two-species scenarios
const CLAY_SITES: usize = 6;
const INVADERS: usize = 4; // of each kind in the competition scenario

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Fertility,
    Contamination,
    Competition,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Fertility,
        ScenarioKind::Contamination,
        ScenarioKind::Competition,
    ];

    /// Canonical identifier
    pub fn id(self) -> &'static str {
        match self {
            ScenarioKind::Fertility => "fertility",
            ScenarioKind::Contamination => "contamination",
            ScenarioKind::Competition => "competition",
        }
    }

    /// Every identifier accepted by `from_str` (lowercase)
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ScenarioKind::Fertility => &["fertility", "hard-hard", "a"],
            ScenarioKind::Contamination => &["contamination", "soft-soft", "b"],
            ScenarioKind::Competition => &["competition", "clay", "c"],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScenarioKind::Fertility => "Fertility (Ca²⁺ + CO₃²⁻)",
            ScenarioKind::Contamination => "Contamination (Hg²⁺ + S²⁻)",
            ScenarioKind::Competition => "Competition (Clay⁻ + K⁺ vs Pb²⁺)",
        }
    }

    /// What to watch for in the animation
    pub fn note(self) -> &'static str {
        match self {
            ScenarioKind::Fertility => {
                "Both ions are hard: pure electrostatics packs them into a rigid, ordered lattice, like calcite."
            }
            ScenarioKind::Contamination => {
                "Both ions are soft and polarizable: covalent-like glue makes them clump, as mercury binds to sulfur."
            }
            ScenarioKind::Competition => {
                "A fixed clay surface carries negative charge; watch hard K⁺ and soft Pb²⁺ compete for the sites."
            }
        }
    }

    /// Build this scenario with the default constants on a 15 x 15 domain
    pub fn build(self, seed: u64) -> Result<World> {
        self.build_with(WorldParams::with_bounds(SCENARIO_SIZE, SCENARIO_SIZE), seed)
    }

    /// Build this scenario with caller-supplied constants.
    ///
    /// Placements assume a domain of at least 15 x 15; smaller domains are
    /// rejected by `World::new` if a particle lands outside.
    pub fn build_with(self, params: WorldParams, seed: u64) -> Result<World> {
        let mut rng = StdRng::seed_from_u64(seed);
        let hi = SCENARIO_SIZE - MARGIN;

        let particles = match self {
            ScenarioKind::Fertility => ion_pairs(&mut rng, CALCIUM, CARBONATE)?,
            ScenarioKind::Contamination => ion_pairs(&mut rng, MERCURY, SULFIDE)?,
            ScenarioKind::Competition => {
                let mut ps = Vec::with_capacity(CLAY_SITES + 2 * INVADERS);
                // clay surface along the bottom
                for i in 0..CLAY_SITES {
                    let x = NVec2::new(2.5 + 2.0 * i as f64, MARGIN);
                    ps.push(CLAY.spawn(i, x)?.pinned());
                }
                // invaders start in the upper part of the box
                for i in 0..INVADERS {
                    let k = NVec2::new(rng.random_range(MARGIN..hi), rng.random_range(5.0..hi));
                    ps.push(POTASSIUM.spawn(i, k)?);
                    let pb = NVec2::new(rng.random_range(MARGIN..hi), rng.random_range(5.0..hi));
                    ps.push(LEAD.spawn(i, pb)?);
                }
                ps
            }
        };

        let world = World::new(params, particles)?;
        debug!(
            "built scenario {} with {} particles (seed {})",
            self.id(),
            world.len(),
            seed
        );
        Ok(world)
    }
}

impl FromStr for ScenarioKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&key.as_str()))
            .ok_or_else(|| Error::UnknownScenario(s.to_string()))
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Interleaved cation/anion pairs at uniform random positions
fn ion_pairs(rng: &mut StdRng, cation: Species, anion: Species) -> Result<Vec<Particle>> {
    let hi = SCENARIO_SIZE - MARGIN;
    let mut ps = Vec::with_capacity(2 * ION_PAIRS);
    for i in 0..ION_PAIRS {
        let c = NVec2::new(rng.random_range(MARGIN..hi), rng.random_range(MARGIN..hi));
        ps.push(cation.spawn(i, c)?);
        let a = NVec2::new(rng.random_range(MARGIN..hi), rng.random_range(MARGIN..hi));
        ps.push(anion.spawn(i, a)?);
    }
    Ok(ps)
}

/// Build the named scenario `identifier` with default constants.
///
/// Errors with `UnknownScenario` if the identifier is not recognized.
pub fn build_scenario(identifier: &str, seed: u64) -> Result<World> {
    identifier.parse::<ScenarioKind>()?.build(seed)
}

/// Build a world from an explicit body list, as loaded from YAML
pub fn build_custom(world: &WorldConfig, bodies: &[BodyConfig]) -> Result<World> {
    let params = world.to_params();
    let particles = bodies
        .iter()
        .map(|bc: &BodyConfig| {
            let p = Particle::new(
                bc.id.clone(),
                bc.kind.clone().unwrap_or_else(|| bc.id.clone()),
                NVec2::new(bc.x[0], bc.x[1]),
                bc.charge,
                bc.mass,
                bc.radius,
                Hardness::from_is_hard(bc.hard),
            )?
            .with_velocity(NVec2::new(bc.v[0], bc.v[1]))?;
            Ok(if bc.pinned { p.pinned() } else { p })
        })
        .collect::<Result<Vec<_>>>()?;

    let world = World::new(params, particles)?;
    debug!("built custom scenario with {} particles", world.len());
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_resolve() {
        assert_eq!("fertility".parse::<ScenarioKind>().unwrap(), ScenarioKind::Fertility);
        assert_eq!("Hard-Hard".parse::<ScenarioKind>().unwrap(), ScenarioKind::Fertility);
        assert_eq!(" soft-soft ".parse::<ScenarioKind>().unwrap(), ScenarioKind::Contamination);
        assert_eq!("C".parse::<ScenarioKind>().unwrap(), ScenarioKind::Competition);
        for kind in ScenarioKind::ALL {
            assert_eq!(kind.to_string().parse::<ScenarioKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = build_scenario("volcano", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownScenario(ref s) if s == "volcano"));
        assert!("".parse::<ScenarioKind>().is_err());
    }

    #[test]
    fn fertility_content() {
        let world = build_scenario("fertility", 7).unwrap();
        assert_eq!(world.len(), 16);
        assert_eq!(world.params().width, SCENARIO_SIZE);
        let ps = world.particles();
        assert_eq!(ps[0].id(), "Ca_0");
        assert_eq!(ps[1].id(), "CO3_0");
        assert!(ps.iter().all(|p| p.hardness() == Hardness::Hard));
        assert!(ps.iter().all(|p| (2.0..13.0).contains(&p.x.x) && (2.0..13.0).contains(&p.x.y)));
        assert_eq!(ps.iter().map(|p| p.charge()).sum::<f64>(), 0.0);
    }

    #[test]
    fn contamination_is_all_soft() {
        let world = build_scenario("b", 7).unwrap();
        assert_eq!(world.len(), 16);
        assert!(world.particles().iter().all(|p| p.hardness() == Hardness::Soft));
        assert_eq!(world.particles()[15].id(), "S_7");
    }

    #[test]
    fn competition_clay_is_pinned_in_a_row() {
        let world = build_scenario("competition", 7).unwrap();
        assert_eq!(world.len(), 14);
        let clay: Vec<_> = world.particles().iter().filter(|p| p.id().starts_with("Clay")).collect();
        assert_eq!(clay.len(), 6);
        for (i, c) in clay.iter().enumerate() {
            assert!(c.is_pinned());
            assert_eq!(c.kind(), "Clay⁻");
            assert_eq!(c.mass(), 1000.0);
            assert_eq!(c.x, NVec2::new(2.5 + 2.0 * i as f64, 2.0));
        }
        let invaders = world.particles().iter().filter(|p| !p.is_pinned());
        assert!(invaders.clone().all(|p| p.x.y >= 5.0));
        assert_eq!(invaders.filter(|p| p.hardness() == Hardness::Soft).count(), 4);
    }

    #[test]
    fn pinned_clay_ignores_its_mass() {
        let mut world = build_scenario("competition", 3).unwrap();
        for _ in 0..40 {
            world.step(0.05).unwrap();
        }
        for c in world.particles().iter().filter(|p| p.is_pinned()) {
            assert_eq!(c.v, NVec2::zeros());
            assert_eq!(c.kinetic_energy(), 0.0);
        }
    }

    #[test]
    fn too_small_domain_is_rejected() {
        let params = WorldParams::with_bounds(5.0, 5.0);
        let err = ScenarioKind::Competition.build_with(params, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
