//! Game rules for tic-tac-toe.
//!
//! Pure functions for classifying a board. Rules are separated from
//! board storage so the advisor and the invariants can share the line table.

pub mod win;

pub use win::{LINES, LineKind, WinningLine, winning_line};

use super::phases::Outcome;
use super::types::Board;
use tracing::instrument;

/// Classifies a board.
///
/// Lines are scanned in table order and the first completed one wins.
/// Without a completed line a full board is a draw; otherwise the game
/// is in progress and the empty-square count is reported.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = winning_line(board) {
        return Outcome::Win { player, line };
    }
    match board.empty_count() {
        0 => Outcome::Draw,
        empty => Outcome::InProgress { empty },
    }
}
