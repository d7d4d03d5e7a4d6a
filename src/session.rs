//! Interactive betting session
//!
//! Drives the engine from line-oriented input. Reader and writer are generic
//! so the same loop runs against stdin/stdout or in-memory buffers.

use crate::errors::{BettingError, SimResult};
use crate::games::{BettingEngine, Player, RandomSource};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// Declined to continue
    PlayerQuit,
    /// Could not meet the minimum bet after the deposit offer
    OutOfFunds,
    /// Input ended mid-prompt
    InputClosed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub player_id: String,
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub rounds_aborted: u32,
    pub total_wagered: f64,
    pub total_paid_out: f64,
    pub final_balance: f64,
    pub end: SessionEnd,
}

pub struct Session<S: RandomSource, R: BufRead, W: Write> {
    engine: BettingEngine<S>,
    player: Player,
    min_bet: f64,
    input: R,
    output: W,
    log_rounds_as_json: bool,
}

/// Accepts `y`/`n` in any case; anything else is invalid.
fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

impl<S: RandomSource, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(engine: BettingEngine<S>, player: Player, min_bet: f64, input: R, output: W) -> Self {
        Self {
            engine,
            player,
            min_bet,
            input,
            output,
            log_rounds_as_json: false,
        }
    }

    pub fn log_rounds_as_json(mut self, enabled: bool) -> Self {
        self.log_rounds_as_json = enabled;
        self
    }

    /// Next input line, or `None` at end of input
    fn read_line(&mut self) -> SimResult<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_yes_no(&mut self, prompt: &str) -> SimResult<Option<bool>> {
        loop {
            write!(self.output, "{} (y/n): ", prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_yes_no(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => writeln!(self.output, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    fn ask_to_continue(&mut self) -> SimResult<bool> {
        Ok(self.ask_yes_no("Do you want to continue playing?")?.unwrap_or(false))
    }

    /// Offer a deposit; returns false if the input closed.
    fn ask_to_deposit(&mut self) -> SimResult<bool> {
        match self.ask_yes_no("You don't have enough money. Do you want to deposit more money?")? {
            None => return Ok(false),
            Some(false) => return Ok(true),
            Some(true) => {}
        }

        loop {
            write!(self.output, "Enter deposit amount: ")?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let deposited = match line.parse::<f64>() {
                Ok(amount) => self.player.deposit(amount),
                Err(_) => Err(BettingError::InvalidAmount { amount: f64::NAN }),
            };
            match deposited {
                Ok(()) => {
                    tracing::info!(player = %self.player.id(), balance = self.player.balance(), "deposit accepted");
                    writeln!(self.output, "New balance: {:.2}", self.player.balance())?;
                    return Ok(true);
                }
                Err(BettingError::InvalidAmount { .. }) => {
                    writeln!(self.output, "Invalid deposit amount. Please enter a positive number.")?
                }
                Err(e) => writeln!(self.output, "Deposit rejected: {}", e)?,
            }
        }
    }

    fn ask_for_bet_amount(&mut self, min_bet: f64, max_bet: f64) -> SimResult<Option<f64>> {
        loop {
            write!(
                self.output,
                "Enter your bet amount (minimum: {:.2}, maximum: {:.2}): ",
                min_bet, max_bet
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(amount) if amount >= min_bet && amount <= max_bet => return Ok(Some(amount)),
                _ => writeln!(
                    self.output,
                    "Invalid bet amount. Please enter a value within the allowed range."
                )?,
            }
        }
    }

    /// Play rounds until the player quits, runs out of funds, or input ends.
    pub fn run(mut self) -> SimResult<SessionSummary> {
        let mut summary = SessionSummary {
            player_id: self.player.id().to_string(),
            rounds_played: 0,
            rounds_won: 0,
            rounds_aborted: 0,
            total_wagered: 0.0,
            total_paid_out: 0.0,
            final_balance: self.player.balance(),
            end: SessionEnd::PlayerQuit,
        };

        tracing::info!(
            player = %self.player.id(),
            model = %self.engine.model(),
            source = %self.engine.source().describe(),
            "session started"
        );
        writeln!(self.output, "Starting balance: {:.2}", self.player.balance())?;

        loop {
            writeln!(self.output, "\n--- New Round ---")?;

            if self.player.balance() < self.min_bet {
                writeln!(self.output, "Your balance is less than the minimum bet.")?;
                if !self.ask_to_deposit()? {
                    summary.end = SessionEnd::InputClosed;
                    break;
                }
            }

            if self.player.balance() < self.min_bet {
                writeln!(self.output, "Still insufficient balance to place the minimum bet. Game over!")?;
                summary.end = SessionEnd::OutOfFunds;
                break;
            }

            let max_bet = self.player.balance();
            let Some(stake) = self.ask_for_bet_amount(self.min_bet, max_bet)? else {
                summary.end = SessionEnd::InputClosed;
                break;
            };

            let bet = match self.engine.place_bet(&mut self.player, stake) {
                Ok(bet) => bet,
                Err(e) => {
                    writeln!(self.output, "Error placing bet: {}", e)?;
                    if !self.ask_to_deposit()? {
                        summary.end = SessionEnd::InputClosed;
                        break;
                    }
                    continue;
                }
            };
            writeln!(self.output, "Bet amount: {:.2}, Odds: {:.2}", bet.stake(), bet.odds())?;

            match self.engine.resolve_round(&mut self.player, bet) {
                Ok(result) => {
                    summary.rounds_played += 1;
                    summary.total_wagered += result.bet.stake();
                    summary.total_paid_out += result.payout;
                    if result.is_win() {
                        summary.rounds_won += 1;
                    }
                    if self.log_rounds_as_json {
                        tracing::info!(target: "rtpsim::rounds", "{}", serde_json::to_string(&result)?);
                    }
                    writeln!(self.output, "Payout: {:.2}", result.payout)?;
                }
                Err(e) => {
                    summary.rounds_aborted += 1;
                    writeln!(self.output, "Error: {}", e)?;
                }
            }

            writeln!(self.output, "Final balance: {:.2}", self.player.balance())?;

            if !self.ask_to_continue()? {
                writeln!(self.output, "Your final balance: {:.2}", self.player.balance())?;
                writeln!(self.output, "Thank you for playing!")?;
                summary.end = SessionEnd::PlayerQuit;
                break;
            }
        }

        summary.final_balance = self.player.balance();
        self.output.flush()?;
        tracing::info!(
            player = %summary.player_id,
            rounds = summary.rounds_played,
            balance = summary.final_balance,
            end = ?summary.end,
            "session finished"
        );
        Ok(summary)
    }
}
