//! Text rendering for front ends
//!
//! The engine never calls into this module. A front end feeds each
//! `RoundResult` to a `RoundObserver` after `play_round` returns.

use crate::game::{Outcome, RoundResult, Tally};

/// Headline shown before the first round and after a reset
pub const IDLE_HEADLINE: &str = "Press any Button";

/// Consumer of round results
pub trait RoundObserver {
    fn on_round(&mut self, result: &RoundResult, tally: Tally);

    fn on_reset(&mut self);
}

/// Three-line description of a round
pub fn describe_round(result: &RoundResult) -> String {
    let verdict = match result.outcome {
        Outcome::Win => "You won",
        Outcome::Loss => "You lost",
        Outcome::Tie => "It's a tie",
    };
    format!(
        "You chose {}.\nThe {} chose {}.\n{}.",
        result.user_move,
        result.strategy_label(),
        result.opponent_move,
        verdict
    )
}

/// The four text lines of the game screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    pub headline: String,
    pub wins: String,
    pub ties: String,
    pub losses: String,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::idle()
    }

    fn idle() -> Self {
        let mut board = Self {
            headline: IDLE_HEADLINE.to_string(),
            wins: String::new(),
            ties: String::new(),
            losses: String::new(),
        };
        board.set_tally(Tally::default());
        board
    }

    fn set_tally(&mut self, tally: Tally) {
        self.wins = format!("Wins: {}", tally.wins);
        self.ties = format!("Ties: {}", tally.ties);
        self.losses = format!("Losses: {}", tally.losses);
    }

    /// Counter lines, in the order they appear on screen
    pub fn counters(&self) -> [&str; 3] {
        [self.wins.as_str(), self.losses.as_str(), self.ties.as_str()]
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundObserver for Scoreboard {
    fn on_round(&mut self, result: &RoundResult, tally: Tally) {
        self.headline = describe_round(result);
        self.set_tally(tally);
    }

    fn on_reset(&mut self) {
        *self = Self::idle();
    }
}
