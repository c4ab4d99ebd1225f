//! Symbol balance invariant: X moves first, so X leads O by zero or one.

use super::super::{Board, Player};
use super::Invariant;

/// Invariant: `count(X) - count(O)` is 0 or 1.
pub struct SymbolBalanceInvariant;

impl SymbolBalanceInvariant {
    /// Returns `(count(X), count(O))` when they are out of balance.
    pub fn imbalance(board: &Board) -> Option<(usize, usize)> {
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        if x >= o && x - o <= 1 {
            None
        } else {
            Some((x, o))
        }
    }
}

impl Invariant<Board> for SymbolBalanceInvariant {
    fn holds(board: &Board) -> bool {
        Self::imbalance(board).is_none()
    }

    fn description() -> &'static str {
        "X leads O by at most one mark and never trails"
    }
}
