//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::phases::Outcome;
use super::{Board, Player, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// Why a move was not applied.
///
/// A rejected move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The key does not name a board position.
    #[display("Unknown position key {}", _0)]
    UnknownPosition(#[error(not(source))] u8),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The move would leave the board in an impossible state.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// What an applied move produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The move that was applied.
    pub action: Move,
    /// Classification of the board after the move.
    pub outcome: Outcome,
    /// Board after the move.
    pub board: Board,
    /// Player to move next (unchanged when the game just ended).
    pub turn: Player,
    /// Set on a draw: the caller should schedule a reset after this delay.
    pub reset_after: Option<Duration>,
}

impl MoveReport {
    /// Returns true if this move ended the game.
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_terminal()
    }
}
