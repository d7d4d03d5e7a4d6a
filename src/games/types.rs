use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single wager. Consumed by exactly one round resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    player_id: String,
    stake: f64,
    odds: f64,
}

impl Bet {
    pub(crate) fn new(player_id: impl Into<String>, stake: f64, odds: f64) -> Self {
        Self {
            player_id: player_id.into(),
            stake,
            odds,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn odds(&self) -> f64 {
        self.odds
    }

    /// Amount credited if this bet wins
    pub fn potential_payout(&self) -> f64 {
        self.stake * self.odds
    }
}

/// Round outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Win,
    Loss,
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Win => write!(f, "win"),
            RoundOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// Settled round, emitted once and never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: Uuid,
    pub bet: Bet,
    /// Uniform value in [0, 1) that decided the round
    pub draw: f64,
    pub win_chance: f64,
    pub outcome: RoundOutcome,
    pub payout: f64,
    pub balance_after: f64,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        self.outcome == RoundOutcome::Win
    }
}
