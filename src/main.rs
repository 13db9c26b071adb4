use gravsim::{build_simulation, Limits, NullSink, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Headless runner: advance a scenario for a fixed number of frames and
/// optionally persist the resulting body state.
#[derive(Parser, Debug)]
struct Args {
    /// YAML scenario to start from (empty simulation when omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// JSON-lines state file to load bodies from
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,

    /// Wall-clock seconds per frame
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Where to save the final state as JSON lines
    #[arg(long)]
    save: Option<PathBuf>,
}

fn build(args: &Args) -> Result<Simulation<NullSink>> {
    let mut sim = match &args.scenario {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening scenario {}", path.display()))?;
            let cfg = ScenarioConfig::from_reader(BufReader::new(file))?;
            build_simulation(cfg, NullSink::new())?
        }
        None => Simulation::new(NullSink::new(), Limits::default()),
    };

    if let Some(path) = &args.load {
        let file =
            File::open(path).with_context(|| format!("opening state {}", path.display()))?;
        let loaded = sim.load_state(BufReader::new(file))?;
        log::info!("loaded {loaded} bodies from {}", path.display());
    }

    Ok(sim)
}

fn main() -> Result<()> {
    // keep the handle alive for the lifetime of the run
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    let args = Args::parse();

    let mut sim = build(&args)?;
    log::info!(
        "running {} ticks over {} bodies at {:.4}s per frame",
        args.ticks,
        sim.body_count(),
        args.frame_dt
    );

    let mut now = 0.0;
    sim.tick(now)?;
    for _ in 0..args.ticks {
        now += args.frame_dt;
        sim.tick(now)?;
    }

    for id in sim.body_ids().collect::<Vec<_>>() {
        if let Some(body) = sim.body(id) {
            log::info!(
                "body {:?}: pos ({:.2}, {:.2}) vel ({:.2}, {:.2})",
                id,
                body.position.x,
                body.position.y,
                body.velocity.x,
                body.velocity.y
            );
        }
    }

    if let Some(path) = &args.save {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        sim.save_state(&mut BufWriter::new(file))?;
        log::info!("state saved to {}", path.display());
    }

    Ok(())
}
