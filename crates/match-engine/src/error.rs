//! Engine error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Move id outside 0..=2. Raised before any state is touched.
    #[error("Invalid move id {0}: expected 0 (Rock), 1 (Paper) or 2 (Scissors)")]
    InvalidMove(u8),

    #[error("Unknown move '{0}': try rock, paper or scissors")]
    UnknownMove(String),
}
