//! rtpsim - command-line casino betting simulator
//!
//! A player bets from a balance, a uniform draw decides the round and the
//! payout follows from the active odds model. The engine is pure arithmetic
//! over an explicitly owned `Player`; randomness is injected.

pub mod config;
pub mod errors;
pub mod games;
pub mod session;

pub use config::{ConfigLoader, SimConfig};
pub use errors::{BettingError, RandomSourceError, RoundError, SimError, SimResult};
pub use games::{BettingEngine, Bet, OddsModel, Player, RandomSource, RoundOutcome, RoundResult};
pub use session::{Session, SessionEnd, SessionSummary};

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into())
        )
        .with_writer(std::io::stderr)
        .try_init();
}
