//! Moves, opponent strategies and the strategy dispatcher

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::game::Outcome;

/// A move in Rock Paper Scissors
///
/// Ids follow the cycle Rock (0) -> Paper (1) -> Scissors (2), where each
/// move is defeated by its successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves in id order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn id(self) -> u8 {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    pub fn from_id(id: u8) -> Result<Self, EngineError> {
        match id {
            0 => Ok(Move::Rock),
            1 => Ok(Move::Paper),
            2 => Ok(Move::Scissors),
            _ => Err(EngineError::InvalidMove(id)),
        }
    }

    /// The move that defeats this one: id `(id + 1) mod 3`
    pub fn weakness(self) -> Self {
        Self::ALL[(self.id() as usize + 1) % 3]
    }

    /// True when this move defeats `other`
    pub fn beats(self, other: Move) -> bool {
        other.weakness() == self
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Move {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Move::from_id(id)
    }
}

impl FromStr for Move {
    type Err = EngineError;

    /// Accepts names, initials or ids, ignoring case and surrounding space
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" | "0" => Ok(Move::Rock),
            "paper" | "p" | "1" => Ok(Move::Paper),
            "scissors" | "s" | "2" => Ok(Move::Scissors),
            _ => Err(EngineError::UnknownMove(s.trim().to_string())),
        }
    }
}

/// Opponent move-selection heuristic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Cheats by reading the user's move. Used while the opponent is behind.
    ShadyDude,
    /// Counters a user who repeats the same move.
    SmartyMarty,
    /// Counters the user's recency-weighted favourite move.
    Statistician,
    /// Uniformly random move.
    BogoBuddy,
}

impl Strategy {
    /// All strategies in dispatch priority order
    pub const ALL: [Strategy; 4] = [
        Strategy::ShadyDude,
        Strategy::SmartyMarty,
        Strategy::Statistician,
        Strategy::BogoBuddy,
    ];

    /// Display name shown next to the opponent's move
    pub fn label(self) -> &'static str {
        match self {
            Strategy::ShadyDude => "Shady Dude",
            Strategy::SmartyMarty => "Smarty Marty",
            Strategy::Statistician => "Statistician",
            Strategy::BogoBuddy => "Bogo Buddy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tuning for the dispatcher's trigger conditions
#[derive(Clone, Debug, PartialEq)]
pub struct DeciderConfig {
    /// Identical trailing moves needed for Smarty Marty
    pub streak_length: usize,
    /// The Statistician needs strictly more recorded moves than this
    pub statistician_min_moves: usize,
    /// Probability in [0, 1] that the Statistician takes an eligible round
    pub statistician_chance: f64,
    /// Trailing moves the Statistician scores
    pub statistician_window: usize,
    /// Extra weight per position inside the window
    pub recency_weight: f64,
}

impl DeciderConfig {
    pub fn standard() -> Self {
        Self {
            streak_length: 3,
            statistician_min_moves: 3,
            statistician_chance: 0.5,
            statistician_window: 10,
            recency_weight: 0.5,
        }
    }
}

impl Default for DeciderConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// The opponent's pick for one round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub strategy: Strategy,
    pub opponent_move: Move,
}

/// Pick the opponent's move for the current round
///
/// # Arguments
/// * `user_history` - Every user move so far, the current one last
/// * `outcomes` - Outcomes of the rounds already completed
/// * `config` - Trigger tuning
/// * `rng` - Source for the Statistician gate and Bogo Buddy
///
/// Strategies are tried in priority order and the first whose trigger holds
/// is used.
pub fn decide<R: Rng + ?Sized>(
    user_history: &[Move],
    outcomes: &[Outcome],
    config: &DeciderConfig,
    rng: &mut R,
) -> Decision {
    let Some(&current) = user_history.last() else {
        return execute_bogo_buddy(rng);
    };

    if running_balance(outcomes) < 0 {
        return Decision {
            strategy: Strategy::ShadyDude,
            opponent_move: execute_shady_dude(current),
        };
    }

    if is_streak(user_history, config.streak_length) {
        return Decision {
            strategy: Strategy::SmartyMarty,
            opponent_move: execute_smarty_marty(current),
        };
    }

    // Gate is drawn only once the history is long enough
    if user_history.len() > config.statistician_min_moves
        && rng.random::<f64>() < config.statistician_chance
    {
        return Decision {
            strategy: Strategy::Statistician,
            opponent_move: execute_statistician(user_history, config),
        };
    }

    execute_bogo_buddy(rng)
}

/// Sum of outcome scores. Negative means the user has won more rounds.
pub(crate) fn running_balance(outcomes: &[Outcome]) -> i32 {
    outcomes.iter().map(|o| o.score() as i32).sum()
}

/// True when the last `len` moves exist and are all the same
fn is_streak(user_history: &[Move], len: usize) -> bool {
    if len == 0 || user_history.len() < len {
        return false;
    }
    let tail = &user_history[user_history.len() - len..];
    tail.iter().all(|m| *m == tail[0])
}

/// Shady Dude: play whatever defeats the user's current move
fn execute_shady_dude(current: Move) -> Move {
    current.weakness()
}

/// Smarty Marty: counter the move being repeated
fn execute_smarty_marty(last: Move) -> Move {
    last.weakness()
}

/// Statistician: counter the user's preferred move
///
/// The move at position `i` of the trailing window scores
/// `1 + recency_weight * i`. Equal scores resolve to the lowest move id.
fn execute_statistician(user_history: &[Move], config: &DeciderConfig) -> Move {
    preferred_move(user_history, config).weakness()
}

fn preferred_move(user_history: &[Move], config: &DeciderConfig) -> Move {
    let start = user_history.len().saturating_sub(config.statistician_window);
    let window = &user_history[start..];

    let mut scores = [0.0f64; 3];
    for (i, m) in window.iter().enumerate() {
        scores[m.id() as usize] += 1.0 + config.recency_weight * i as f64;
    }

    let mut preferred = Move::Rock;
    for m in Move::ALL {
        if scores[m.id() as usize] > scores[preferred.id() as usize] {
            preferred = m;
        }
    }
    preferred
}

/// Bogo Buddy: uniform random move
fn execute_bogo_buddy<R: Rng + ?Sized>(rng: &mut R) -> Decision {
    Decision {
        strategy: Strategy::BogoBuddy,
        opponent_move: Move::ALL[rng.random_range(0..Move::ALL.len())],
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::ShadyDude => "Peeks at your move whenever it is losing the match.",
        Strategy::SmartyMarty => "Punishes you for throwing the same move three times running.",
        Strategy::Statistician => "Counters your favourite move, weighting recent throws higher.",
        Strategy::BogoBuddy => "Throws a uniformly random move.",
    }
}
