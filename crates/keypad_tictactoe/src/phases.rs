//! Game phase and outcome types.

use super::rules::WinningLine;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// Whether a match still accepts moves.
///
/// `Active` is initial, `Finished` is terminal until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    Active,
    /// A win or draw has been detected.
    Finished,
}

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty squares remain.
    ///
    /// `empty` is reported for observability only.
    InProgress {
        /// Number of empty squares.
        empty: usize,
    },
    /// A player completed a line.
    Win {
        /// The winner.
        player: Player,
        /// First completed line in table order.
        line: WinningLine,
    },
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<&WinningLine> {
        match self {
            Outcome::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Returns true for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress { empty } => write!(f, "In progress ({} empty)", empty),
            Outcome::Win { player, line } => write!(f, "Player {} wins on {}", player, line),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
