//! Swarm Arena - Headless Runner
//!
//! Loads a configuration, scatters a predator/prey population and runs a
//! fixed number of ticks, printing a summary or the final snapshot as JSON.

use clap::Parser;
use std::path::PathBuf;
use swarm_arena::core::config::SimulationConfig;
use swarm_arena::core::error::Result;
use swarm_arena::replication::EnvironmentSnapshot;
use swarm_arena::scenario::{self, PREDATOR_TAG, PREY_TAG};

/// Headless predator/prey simulation
#[derive(Parser, Debug)]
#[command(name = "swarm-arena")]
#[command(about = "Run a headless predator/prey simulation")]
struct Args {
    /// TOML configuration (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed seconds per tick (forces the fixed-step clock)
    #[arg(long)]
    step: Option<f64>,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("swarm_arena=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(step) = args.step {
        config.clock.wall_clock = false;
        config.clock.fixed_step = step;
    }
    config.validate()?;

    tracing::info!(ticks = args.ticks, seed = ?config.seed, "Swarm Arena starting");

    let mut environment = scenario::predator_prey(&config)?;
    let mut faults = 0usize;
    let mut births = 0usize;
    for _ in 0..args.ticks {
        let report = environment.interact();
        faults += report.faults.len();
        births += report.spawned.len();
        if report.tick % 100 == 0 {
            tracing::info!(
                tick = report.tick,
                prey = scenario::census(&environment, PREY_TAG),
                predators = scenario::census(&environment, PREDATOR_TAG),
                "progress"
            );
        }
    }

    if args.json {
        println!("{}", EnvironmentSnapshot::capture(&environment).to_json_pretty()?);
        return Ok(());
    }

    println!("\n=== SWARM ARENA ===");
    println!("Ticks run:     {}", environment.tick());
    println!("Objects left:  {}", environment.len());
    println!("Prey:          {}", scenario::census(&environment, PREY_TAG));
    println!("Predators:     {}", scenario::census(&environment, PREDATOR_TAG));
    println!("Births:        {}", births);
    println!("Faults:        {}", faults);
    Ok(())
}
