use crate::errors::{BettingError, RoundError};
use crate::games::odds::OddsModel;
use crate::games::player::Player;
use crate::games::random::RandomSource;
use crate::games::types::{Bet, RoundOutcome, RoundResult};
use uuid::Uuid;

/// Creates bets and resolves rounds against an explicitly passed player
pub struct BettingEngine<R: RandomSource> {
    model: OddsModel,
    source: R,
}

/// Settle a bet against an already drawn value.
///
/// Win iff `draw < win_chance`. A win credits `stake * odds`; a loss leaves
/// the balance alone because the stake was debited when the bet was placed.
/// A payout that cannot be credited leaves the balance untouched.
pub fn resolve(
    model: &OddsModel,
    player: &mut Player,
    bet: Bet,
    draw: f64,
) -> Result<RoundResult, BettingError> {
    let win_chance = model.win_chance(bet.stake(), bet.odds());
    let outcome = if draw < win_chance {
        RoundOutcome::Win
    } else {
        RoundOutcome::Loss
    };

    let payout = match outcome {
        RoundOutcome::Win => bet.potential_payout(),
        RoundOutcome::Loss => 0.0,
    };
    if payout > 0.0 {
        player.apply_payout(payout)?;
    }

    Ok(RoundResult {
        round_id: Uuid::new_v4(),
        bet,
        draw,
        win_chance,
        outcome,
        payout,
        balance_after: player.balance(),
    })
}

impl<R: RandomSource> BettingEngine<R> {
    pub fn new(model: OddsModel, source: R) -> Self {
        Self { model, source }
    }

    pub fn model(&self) -> &OddsModel {
        &self.model
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Price a bet without touching the balance.
    pub fn new_bet(&self, player: &Player, stake: f64) -> Bet {
        Bet::new(player.id(), stake, self.model.odds(stake))
    }

    /// Debit the stake and hand back the bet that must be resolved.
    ///
    /// Bets whose win could not be credited to the current balance are
    /// rejected before anything is debited.
    pub fn place_bet(&self, player: &mut Player, stake: f64) -> Result<Bet, BettingError> {
        let bet = self.new_bet(player, stake);
        if stake > 0.0 && stake.is_finite() && !player.can_credit(bet.potential_payout()) {
            return Err(BettingError::BalanceOverflow {
                balance: player.balance(),
                amount: bet.potential_payout(),
            });
        }
        player.place_bet(stake)?;
        tracing::debug!(
            player = %player.id(),
            stake = bet.stake(),
            odds = bet.odds(),
            balance = player.balance(),
            "bet placed"
        );
        Ok(bet)
    }

    /// Draw once and settle a placed bet.
    ///
    /// If the random source fails, or the payout can no longer be credited,
    /// the round is aborted and the stake refunded.
    pub fn resolve_round(&mut self, player: &mut Player, bet: Bet) -> Result<RoundResult, RoundError> {
        let draw = match self.source.next_uniform() {
            Ok(draw) => draw,
            Err(e) => {
                player.refund(bet.stake());
                tracing::warn!(
                    player = %player.id(),
                    stake = bet.stake(),
                    error = %e,
                    "round aborted, stake refunded"
                );
                return Err(e.into());
            }
        };

        let stake = bet.stake();
        let result = match resolve(&self.model, player, bet, draw) {
            Ok(result) => result,
            Err(e) => {
                player.refund(stake);
                tracing::warn!(
                    player = %player.id(),
                    stake,
                    error = %e,
                    "payout rejected, stake refunded"
                );
                return Err(e.into());
            }
        };
        tracing::info!(
            round = %result.round_id,
            outcome = %result.outcome,
            payout = result.payout,
            balance = result.balance_after,
            "round resolved"
        );
        Ok(result)
    }

    /// Place and resolve in one step.
    pub fn play_round(&mut self, player: &mut Player, stake: f64) -> Result<RoundResult, RoundError> {
        let bet = self.place_bet(player, stake)?;
        self.resolve_round(player, bet)
    }
}
