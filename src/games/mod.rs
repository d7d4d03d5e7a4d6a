pub mod types;
pub mod player;
pub mod odds;
pub mod random;
pub mod engine;
pub mod simulation;

pub use types::*;
pub use player::Player;
pub use odds::{rtp_percent, OddsModel, OddsModelKind};
pub use random::{RandomSource, SecureRandom, SeededRandom, SequenceRandom};
pub use engine::BettingEngine;
pub use simulation::{simulate_rtp, RtpReport};
