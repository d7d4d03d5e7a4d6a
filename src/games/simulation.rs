//! Monte Carlo RTP estimation
//!
//! Plays `iterations` independent rounds with stakes cycling through
//! 5..=14 against the model's own win chance. No player balance is involved.

use crate::errors::RandomSourceError;
use crate::games::odds::{rtp_percent, OddsModel};
use crate::games::random::RandomSource;
use serde::{Deserialize, Serialize};

const BASE_STAKE: f64 = 5.0;
const STAKE_CYCLE: usize = 10;

/// Stake used for iteration `i`
pub fn stake_for_iteration(i: usize) -> f64 {
    BASE_STAKE + (i % STAKE_CYCLE) as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtpReport {
    pub model: OddsModel,
    pub iterations: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_wagered: f64,
    pub total_returned: f64,
    /// total_returned / total_wagered * 100
    pub rtp_percent: f64,
    /// Mean net result per round (payout on a win, minus stake on a loss)
    pub average_net: f64,
    pub theoretical_rtp_percent: f64,
    pub house_edge: f64,
}

/// Mean of the per-stake theoretical RTP over the stake cycle
pub fn theoretical_rtp(model: &OddsModel) -> f64 {
    let total: f64 = (0..STAKE_CYCLE)
        .map(|i| {
            let stake = stake_for_iteration(i);
            let odds = model.odds(stake);
            rtp_percent(model.win_chance(stake, odds), odds)
        })
        .sum();
    total / STAKE_CYCLE as f64
}

pub fn simulate_rtp<R: RandomSource + ?Sized>(
    model: &OddsModel,
    source: &mut R,
    iterations: usize,
) -> Result<RtpReport, RandomSourceError> {
    let mut wins = 0usize;
    let mut total_wagered = 0.0;
    let mut total_returned = 0.0;
    let mut net = 0.0;

    for i in 0..iterations {
        let stake = stake_for_iteration(i);
        let odds = model.odds(stake);
        let win_chance = model.win_chance(stake, odds);
        let draw = source.next_uniform()?;

        total_wagered += stake;
        if draw < win_chance {
            wins += 1;
            let payout = stake * odds;
            total_returned += payout;
            net += payout;
        } else {
            net -= stake;
        }
    }

    let (win_rate, average_net) = if iterations == 0 {
        (0.0, 0.0)
    } else {
        (wins as f64 / iterations as f64, net / iterations as f64)
    };
    let rtp = if total_wagered > 0.0 {
        total_returned / total_wagered * 100.0
    } else {
        0.0
    };

    tracing::debug!(iterations, wins, rtp, "rtp simulation finished");

    Ok(RtpReport {
        model: *model,
        iterations,
        wins,
        win_rate,
        total_wagered,
        total_returned,
        rtp_percent: rtp,
        average_net,
        theoretical_rtp_percent: theoretical_rtp(model),
        house_edge: 1.0 - rtp / 100.0,
    })
}

impl RtpReport {
    /// Human-readable report with two-decimal figures
    pub fn render(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("RTP simulation ({})\n", self.model));
        report.push_str(&format!("{}\n", "=".repeat(40)));
        report.push_str(&format!("Rounds: {}, wins: {} ({:.2}%)\n", self.iterations, self.wins, self.win_rate * 100.0));
        report.push_str(&format!("Total wagered: {:.2}, total returned: {:.2}\n", self.total_wagered, self.total_returned));
        report.push_str(&format!("Empirical RTP: {:.2}%\n", self.rtp_percent));
        report.push_str(&format!("Theoretical RTP: {:.2}%\n", self.theoretical_rtp_percent));
        report.push_str(&format!("House edge: {:.2}%\n", self.house_edge * 100.0));
        report.push_str(&format!("Average net per round: {:.2}\n", self.average_net));

        report
    }
}
