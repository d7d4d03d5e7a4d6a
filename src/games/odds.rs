//! Odds and win-chance models
//!
//! Both functions are pure: the same stake always yields the same odds and
//! the same win chance. Win chance shrinks as stake or odds grow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default RTP constant for the linear model
pub const DEFAULT_RTP: f64 = 0.95;

/// Numerator of the tiered model's win chance; fixes its RTP at 49.5%
pub const TIERED_WIN_FACTOR: f64 = 0.495;

/// How a stake maps to an odds multiplier and a win chance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OddsModel {
    /// stake <= 10 -> 1.2x, stake <= 50 -> 1.5x, else 2.0x; win chance 0.495 / odds
    #[default]
    Tiered,
    /// odds = rtp * stake; win chance 1 / (1 + stake / 10)
    Linear { rtp: f64 },
}

impl OddsModel {
    pub fn odds(&self, stake: f64) -> f64 {
        match *self {
            OddsModel::Tiered => {
                if stake <= 10.0 {
                    1.2
                } else if stake <= 50.0 {
                    1.5
                } else {
                    2.0
                }
            }
            OddsModel::Linear { rtp } => rtp * stake,
        }
    }

    /// Probability in [0, 1] that a bet with this stake and odds wins
    pub fn win_chance(&self, stake: f64, odds: f64) -> f64 {
        let chance = match *self {
            OddsModel::Tiered => TIERED_WIN_FACTOR / odds,
            OddsModel::Linear { .. } => 1.0 / (1.0 + stake / 10.0),
        };
        chance.clamp(0.0, 1.0)
    }

    /// Theoretical RTP for a single stake, as a percentage
    pub fn rtp_for_stake(&self, stake: f64) -> f64 {
        let odds = self.odds(stake);
        rtp_percent(self.win_chance(stake, odds), odds)
    }
}

impl fmt::Display for OddsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddsModel::Tiered => write!(f, "tiered"),
            OddsModel::Linear { rtp } => write!(f, "linear (rtp {:.2})", rtp),
        }
    }
}

/// Name-only selector used by config and the CLI; the linear RTP is
/// always `game.rtp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsModelKind {
    #[default]
    Tiered,
    Linear,
}

impl OddsModelKind {
    pub fn with_rtp(self, rtp: f64) -> OddsModel {
        match self {
            OddsModelKind::Tiered => OddsModel::Tiered,
            OddsModelKind::Linear => OddsModel::Linear { rtp },
        }
    }
}

impl FromStr for OddsModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiered" => Ok(OddsModelKind::Tiered),
            "linear" => Ok(OddsModelKind::Linear),
            other => Err(format!("unknown odds model '{}' (expected tiered or linear)", other)),
        }
    }
}

/// `win_chance * odds * 100`
pub fn rtp_percent(win_chance: f64, odds: f64) -> f64 {
    win_chance * odds * 100.0
}
