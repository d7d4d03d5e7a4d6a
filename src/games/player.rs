//! Player balance ledger
//!
//! The balance only changes through the methods here, and none of them can
//! take it below zero.

use crate::errors::BettingError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: String,
    balance: f64,
}

fn validate_amount(amount: f64) -> Result<(), BettingError> {
    // `!(amount > 0.0)` also rejects NaN
    if !(amount > 0.0) || !amount.is_finite() {
        return Err(BettingError::InvalidAmount { amount });
    }
    Ok(())
}

impl Player {
    /// Create a player. Negative or non-finite opening balances clamp to zero.
    pub fn new(id: impl Into<String>, balance: f64) -> Self {
        let balance = if balance.is_finite() { balance.max(0.0) } else { 0.0 };
        Self {
            id: id.into(),
            balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Debit a stake before the round is resolved.
    pub fn place_bet(&mut self, amount: f64) -> Result<(), BettingError> {
        validate_amount(amount)?;
        if amount > self.balance {
            return Err(BettingError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credit a deposit. No upper bound beyond what an `f64` can hold.
    pub fn deposit(&mut self, amount: f64) -> Result<(), BettingError> {
        self.credit(amount)
    }

    /// Credit the payout of a won round.
    pub fn apply_payout(&mut self, amount: f64) -> Result<(), BettingError> {
        self.credit(amount)
    }

    /// Whether `amount` could be credited without leaving the finite range.
    pub fn can_credit(&self, amount: f64) -> bool {
        (self.balance + amount).is_finite()
    }

    /// Return a stake whose round never resolved. The stake came out of this
    /// balance, so putting it back cannot overflow.
    pub fn refund(&mut self, amount: f64) {
        if amount > 0.0 && amount.is_finite() {
            self.balance += amount;
        }
    }

    fn credit(&mut self, amount: f64) -> Result<(), BettingError> {
        validate_amount(amount)?;
        if !self.can_credit(amount) {
            return Err(BettingError::BalanceOverflow {
                balance: self.balance,
                amount,
            });
        }
        self.balance += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_bet_debits_exact_amount() {
        let mut player = Player::new("player1", 100.0);
        player.place_bet(20.0).unwrap();
        assert_eq!(player.balance(), 80.0);

        player.place_bet(80.0).unwrap();
        assert_eq!(player.balance(), 0.0);
    }

    #[test]
    fn test_non_positive_stake_is_invalid() {
        let mut player = Player::new("player1", 100.0);
        for amount in [0.0, -1.0, -0.01, f64::NAN, f64::INFINITY] {
            let err = player.place_bet(amount).unwrap_err();
            assert!(matches!(err, BettingError::InvalidAmount { .. }));
        }
        assert_eq!(player.balance(), 100.0);
    }

    #[test]
    fn test_stake_above_balance_is_rejected() {
        let mut player = Player::new("player1", 100.0);
        let err = player.place_bet(150.0).unwrap_err();
        assert_eq!(
            err,
            BettingError::InsufficientBalance {
                requested: 150.0,
                available: 100.0
            }
        );
        assert_eq!(player.balance(), 100.0);

        assert!(player.place_bet(100.01).is_err());
        assert_eq!(player.balance(), 100.0);
    }

    #[test]
    fn test_deposit() {
        let mut player = Player::new("player1", 0.0);
        player.deposit(1_000_000.0).unwrap();
        assert_eq!(player.balance(), 1_000_000.0);

        assert!(player.deposit(0.0).is_err());
        assert!(player.deposit(-5.0).is_err());
        assert_eq!(player.balance(), 1_000_000.0);
    }

    #[test]
    fn test_payout_and_refund_credit() {
        let mut player = Player::new("player1", 80.0);
        player.apply_payout(30.0).unwrap();
        assert_eq!(player.balance(), 110.0);

        player.refund(20.0);
        assert_eq!(player.balance(), 130.0);

        assert!(player.apply_payout(-10.0).is_err());
        assert!(player.apply_payout(f64::INFINITY).is_err());
        assert_eq!(player.balance(), 130.0);
    }

    #[test]
    fn test_credit_overflow_is_rejected() {
        let mut player = Player::new("player1", 0.0);
        player.deposit(1e308).unwrap();

        let err = player.deposit(1e308).unwrap_err();
        assert_eq!(
            err,
            BettingError::BalanceOverflow {
                balance: 1e308,
                amount: 1e308
            }
        );
        assert_eq!(player.balance(), 1e308);

        let err = player.apply_payout(f64::MAX).unwrap_err();
        assert!(matches!(err, BettingError::BalanceOverflow { .. }));
        assert!(player.balance().is_finite());
    }

    #[test]
    fn test_new_clamps_negative_balance() {
        assert_eq!(Player::new("p", -5.0).balance(), 0.0);
        assert_eq!(Player::new("p", f64::NAN).balance(), 0.0);
    }
}
