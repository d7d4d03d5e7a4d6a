//! Standalone RTP report
//!
//! Runs the Monte Carlo simulation without an interactive session.

use clap::Parser;
use rtpsim::{
    config::{ConfigLoader, RandomSourceKind},
    errors::{ConfigurationError, SimResult},
    games::{odds::OddsModelKind, random, simulate_rtp},
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rtp-report")]
#[command(about = "Estimate return-to-player by simulation", long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds to simulate
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Odds model: tiered or linear
    #[arg(long)]
    odds_model: Option<OddsModelKind>,

    /// RTP constant for the linear odds model
    #[arg(long)]
    rtp: Option<f64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> SimResult<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(rtp) = args.rtp {
        config.game.rtp = rtp;
    }
    if let Some(kind) = args.odds_model {
        config.game.odds_model = kind;
    }
    if let Some(seed) = args.seed {
        config.random.source = RandomSourceKind::Seeded;
        config.random.seed = Some(seed);
    }
    if let Some(iterations) = args.iterations {
        config.report.iterations = iterations;
    }
    config.report.enabled = true;
    config.validate().map_err(ConfigurationError::from)?;

    rtpsim::init_tracing(config.monitoring.log_level.as_filter());

    let model = config.odds_model();
    let mut source = random::from_config(&config.random)?;
    tracing::info!(model = %model, source = %source.describe(), iterations = config.report.iterations, "simulating");

    let report = simulate_rtp(&model, &mut source, config.report.iterations)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    Ok(())
}
