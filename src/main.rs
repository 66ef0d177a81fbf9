use soillab::{build_custom, run, ScenarioKind, SimulationConfig, Trajectory};
use clap::Parser;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Simulate a soil chemistry scenario and write its trajectory as YAML
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario identifier (fertility, contamination, competition or an alias)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Seed for random initial placements
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames (integration steps) to record
    #[arg(short, long, allow_negative_numbers = true)]
    frames: Option<i64>,

    /// Fixed time step
    #[arg(long, allow_negative_numbers = true)]
    dt: Option<f64>,

    /// YAML file with `world`, `run` and optional `bodies` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the trajectory here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the recognized scenarios and exit
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    scenario: &'a str,
    seed: Option<u64>,
    #[serde(flatten)]
    trajectory: &'a Trajectory,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    // flags win over the file
    if let Some(s) = &args.scenario {
        cfg.run.scenario = s.clone();
    }
    if let Some(seed) = args.seed {
        cfg.run.seed = seed;
    }
    if let Some(frames) = args.frames {
        cfg.run.frames = frames;
    }
    if let Some(dt) = args.dt {
        cfg.run.dt = dt;
    }
    Ok(cfg)
}

fn list_scenarios() {
    for kind in ScenarioKind::ALL {
        println!("{:<14} {}", kind.id(), kind.title());
        println!("{:<14} aliases: {}", "", kind.aliases().join(", "));
        println!("{:<14} {}", "", kind.note());
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        list_scenarios();
        return Ok(());
    }

    let cfg = load_config(&args)?;

    let (label, seed, mut world) = match &cfg.bodies {
        Some(bodies) => {
            let world = build_custom(&cfg.world, bodies).context("invalid custom scenario")?;
            ("custom".to_string(), None, world)
        }
        None => {
            let kind: ScenarioKind = cfg.run.scenario.parse()?;
            let world = kind
                .build_with(cfg.world.to_params(), cfg.run.seed)
                .with_context(|| format!("failed to build scenario {kind}"))?;
            (kind.id().to_string(), Some(cfg.run.seed), world)
        }
    };

    info!("running {} ({} particles) for {} frames", label, world.len(), cfg.run.frames);
    let trajectory = run(&mut world, cfg.run.frames, cfg.run.dt)?;

    let out = RunOutput {
        scenario: &label,
        seed,
        trajectory: &trajectory,
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);
    serde_yaml::to_writer(&mut writer, &out)?;
    writer.flush()?;
    Ok(())
}
