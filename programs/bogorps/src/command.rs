//! Parsing of terminal input lines

use match_engine::{EngineError, Move};

/// One line of user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Reset,
    Score,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Command, EngineError>> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        let command = match word.to_ascii_lowercase().as_str() {
            "reset" => Ok(Command::Reset),
            "score" => Ok(Command::Score),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => word.parse().map(Command::Play),
        };
        Some(command)
    }
}

pub const HELP: &str = "\
Moves:    rock | paper | scissors  (or r, p, s, 0, 1, 2)
Commands: score, reset, help, quit";
