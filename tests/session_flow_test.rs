//! Scripted end-to-end sessions over in-memory I/O

use rtpsim::games::{BettingEngine, OddsModel, Player, SequenceRandom};
use rtpsim::session::{Session, SessionEnd};
use std::io::Cursor;

fn play(balance: f64, draws: Vec<f64>, script: &str) -> (rtpsim::SessionSummary, String) {
    let engine = BettingEngine::new(OddsModel::Tiered, SequenceRandom::new(draws));
    let player = Player::new("player1", balance);
    let mut output = Vec::new();
    let summary = Session::new(engine, player, 5.0, Cursor::new(script.to_string()), &mut output)
        .run()
        .expect("session should not fail on in-memory I/O");
    (summary, String::from_utf8(output).expect("utf-8 output"))
}

#[test]
fn test_loss_then_win_across_rounds() {
    // round 1: stake 20 loses -> 80; round 2: stake 10 wins at 1.2x -> 82
    let (summary, out) = play(100.0, vec![0.99, 0.0], "20\ny\n10\nn\n");

    assert_eq!(summary.rounds_played, 2);
    assert_eq!(summary.rounds_won, 1);
    assert_eq!(summary.total_wagered, 30.0);
    assert_eq!(summary.total_paid_out, 12.0);
    assert_eq!(summary.final_balance, 82.0);
    assert_eq!(out.matches("--- New Round ---").count(), 2);
    assert!(out.contains("Final balance: 80.00"));
    assert!(out.contains("Your final balance: 82.00"));
}

#[test]
fn test_deposit_offer_refills_balance() {
    // lose everything, accept deposit of 50, bet 5 and quit
    let (summary, out) = play(10.0, vec![0.99], "10\ny\ny\n-3\n50\n5\nn\n");

    assert!(out.contains("Your balance is less than the minimum bet."));
    assert!(out.contains("Invalid deposit amount."));
    assert!(out.contains("New balance: 50.00"));
    assert_eq!(summary.rounds_played, 2);
    assert_eq!(summary.final_balance, 45.0);
    assert_eq!(summary.end, SessionEnd::PlayerQuit);
}

#[test]
fn test_declined_deposit_ends_game() {
    let (summary, out) = play(4.0, vec![0.0], "n\n");

    assert!(out.contains("Still insufficient balance to place the minimum bet. Game over!"));
    assert_eq!(summary.rounds_played, 0);
    assert_eq!(summary.end, SessionEnd::OutOfFunds);
    assert_eq!(summary.final_balance, 4.0);
}

#[test]
fn test_bet_limits_follow_balance() {
    let (_, out) = play(30.0, vec![0.99], "31\n30\nn\n");

    assert!(out.contains("Enter your bet amount (minimum: 5.00, maximum: 30.00): "));
    assert_eq!(out.matches("Invalid bet amount.").count(), 1);
    assert!(out.contains("Your final balance: 0.00"));
}
