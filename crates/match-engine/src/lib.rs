//! Match Engine for Bogorps
//!
//! Rock Paper Scissors against an opponent that switches between a few
//! simple heuristics. This crate is compiled to:
//! - Native (for the terminal front end)
//! - WASM (for a browser front end)

mod error;
mod strategy;
mod game;
pub mod display;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::EngineError;
pub use strategy::{decide, describe_strategy, DeciderConfig, Decision, Move, Strategy};
pub use game::{MatchEngine, Outcome, RoundResult, Tally};
pub use display::{describe_round, RoundObserver, Scoreboard};

/// Decide a round from the user's side
///
/// Equal moves tie. The user wins (-1) when their move is the weakness of
/// the opponent's move, otherwise the user loses (+1).
pub fn find_winner(user: Move, opponent: Move) -> Outcome {
    if user == opponent {
        Outcome::Tie
    } else if user == opponent.weakness() {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}
