//! Single winner invariant: both players can never own a completed line.

use super::super::rules::LINES;
use super::super::{Board, Player};
use super::Invariant;

/// Invariant: at most one player owns a completed line.
///
/// One player may complete two lines with a single move, so this does not
/// limit the number of lines.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        let owns = |player: Player| LINES.iter().any(|line| line.owner(board) == Some(player));
        !(owns(Player::X) && owns(Player::O))
    }

    fn description() -> &'static str {
        "At most one player owns a completed line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_line_for_one_player_holds() {
        // X completes both diagonals through the center.
        let board: Board = "XOX|OXO|XOX".parse().unwrap();
        assert!(SingleWinnerInvariant::holds(&board));
    }

    #[test]
    fn test_both_players_winning_violates() {
        let board: Board = "XXX|OOO|...".parse().unwrap();
        assert!(!SingleWinnerInvariant::holds(&board));
    }
}
