//! rtpsim - interactive betting session
//!
//! Plays rounds against stdin/stdout, then prints the simulated average RTP.

use clap::Parser;
use rtpsim::{
    config::{ConfigLoader, RandomSourceKind},
    errors::SimResult,
    games::{odds::OddsModelKind, random, simulate_rtp, BettingEngine, Player},
    session::Session,
};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rtpsim")]
#[command(about = "Command-line casino betting simulator", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player identifier
    #[arg(long)]
    player_id: Option<String>,

    /// Opening balance
    #[arg(long)]
    starting_balance: Option<f64>,

    /// Minimum bet per round
    #[arg(long)]
    min_bet: Option<f64>,

    /// RTP constant for the linear odds model
    #[arg(long)]
    rtp: Option<f64>,

    /// Odds model: tiered or linear
    #[arg(long)]
    odds_model: Option<OddsModelKind>,

    /// Use a seeded generator instead of the OS random source
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds simulated for the closing RTP report
    #[arg(long)]
    report_iterations: Option<usize>,

    /// Skip the closing RTP report
    #[arg(long)]
    no_report: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write a sample configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,
}

fn main() -> SimResult<()> {
    let args = Args::parse();

    if let Some(path) = &args.generate_config {
        rtpsim::config::generate_sample_config(&path.to_string_lossy())?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(id) = args.player_id {
        config.game.player_id = id;
    }
    if let Some(balance) = args.starting_balance {
        config.game.starting_balance = balance;
    }
    if let Some(min_bet) = args.min_bet {
        config.game.min_bet = min_bet;
    }
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
    if let Some(iterations) = args.report_iterations {
        config.report.iterations = iterations;
    }
    if args.no_report {
        config.report.enabled = false;
    }
    config
        .validate()
        .map_err(rtpsim::errors::ConfigurationError::from)?;

    let level = if args.verbose { "debug" } else { config.monitoring.log_level.as_filter() };
    rtpsim::init_tracing(level);

    let model = config.odds_model();
    let engine = BettingEngine::new(model, random::from_config(&config.random)?);
    let player = Player::new(config.game.player_id.clone(), config.game.starting_balance);

    let stdin = io::stdin();
    let summary = Session::new(engine, player, config.game.min_bet, stdin.lock(), io::stdout())
        .log_rounds_as_json(config.monitoring.log_rounds_as_json)
        .run()?;
    tracing::debug!(?summary, "session summary");

    if config.report.enabled {
        let mut source = random::from_config(&config.random)?;
        let report = simulate_rtp(&model, &mut source, config.report.iterations)?;
        println!(
            "Average RTP output over {} iterations: {:.2}",
            report.iterations, report.average_net
        );
        println!("Empirical RTP: {:.2}% (theoretical {:.2}%)", report.rtp_percent, report.theoretical_rtp_percent);
    }

    Ok(())
}
