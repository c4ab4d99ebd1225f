//! Single-ply move advisor.
//!
//! The advisor looks at the current board only: it takes an immediate win,
//! blocks an immediate loss, and otherwise falls back to fixed positional
//! preferences. It does not search the game tree, so it is not
//! game-theoretically optimal and can be beaten by forks.

use super::rules::{LINES, WinningLine};
use super::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Score for a line fully held by the player.
pub const COMPLETE_LINE_SCORE: u32 = 100;
/// Score for two marks and an empty square on an unblocked line.
pub const OPEN_TWO_SCORE: u32 = 10;
/// Score for one mark and two empty squares on an unblocked line.
pub const OPEN_ONE_SCORE: u32 = 1;

/// Counts `(player marks, empty squares)` on each line, skipping lines
/// that contain an opponent mark.
fn open_lines(
    board: &Board,
    player: Player,
) -> impl Iterator<Item = (usize, usize, &'static WinningLine)> + '_ {
    LINES.iter().filter_map(move |line| {
        let squares = line.squares(board);
        if squares.iter().any(|s| s.is(player.opponent())) {
            return None;
        }
        let own = squares.iter().filter(|s| s.is(player)).count();
        let empty = squares.iter().filter(|s| **s == Square::Empty).count();
        Some((own, empty, line))
    })
}

/// Empty squares that would complete a line for `player`.
///
/// Lines are visited in table order and each position is reported once.
#[instrument(skip(board))]
pub fn critical_positions(board: &Board, player: Player) -> Vec<Position> {
    let mut critical = Vec::new();
    for (own, empty, line) in open_lines(board, player) {
        if own != 2 || empty != 1 {
            continue;
        }
        let Some(pos) = line.positions.iter().copied().find(|p| board.is_legal(*p)) else {
            continue;
        };
        if !critical.contains(&pos) {
            critical.push(pos);
        }
    }
    critical
}

/// Sums line scores for `player`; lines blocked by the opponent score zero.
#[instrument(skip(board))]
pub fn heuristic_score(board: &Board, player: Player) -> u32 {
    open_lines(board, player)
        .map(|(own, empty, _)| match (own, empty) {
            (3, _) => COMPLETE_LINE_SCORE,
            (2, 1) => OPEN_TWO_SCORE,
            (1, 2) => OPEN_ONE_SCORE,
            _ => 0,
        })
        .sum()
}

/// Suggests a move for `player`, or `None` on a full board.
///
/// In order of preference: complete an own line, block an opponent line,
/// take the center, take the first free corner (1, 3, 7, 9), take the
/// first free square in declaration order.
#[instrument(skip(board))]
pub fn best_move(board: &Board, player: Player) -> Option<Position> {
    if let Some(&pos) = critical_positions(board, player).first() {
        debug!(%pos, "Advisor takes the win");
        return Some(pos);
    }

    if let Some(&pos) = critical_positions(board, player.opponent()).first() {
        debug!(%pos, "Advisor blocks the opponent");
        return Some(pos);
    }

    if board.is_legal(Position::CENTER) {
        return Some(Position::CENTER);
    }

    Position::CORNERS
        .iter()
        .copied()
        .find(|pos| board.is_legal(*pos))
        .or_else(|| Position::valid_moves(board).first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_positions_dedup_in_table_order() {
        // 4 closes column 7-4-1 and comes before row 7-8-9 (closed by 8).
        let board: Board = "X.X|.OO|XOX".parse().unwrap();
        let critical = critical_positions(&board, Player::X);
        assert_eq!(
            critical,
            vec![Position::MiddleLeft, Position::TopCenter]
        );
    }

    #[test]
    fn test_critical_positions_reported_once() {
        // 5 closes column 8-5-2 and row 4-5-6.
        let board: Board = "OXO|X.X|OX.".parse().unwrap();
        assert_eq!(critical_positions(&board, Player::X), vec![Position::Center]);
    }

    #[test]
    fn test_critical_ignores_blocked_lines() {
        let board: Board = "XXO|...|...".parse().unwrap();
        assert!(critical_positions(&board, Player::X).is_empty());
    }

    #[test]
    fn test_heuristic_empty_board() {
        assert_eq!(heuristic_score(&Board::new(), Player::X), 0);
    }

    #[test]
    fn test_heuristic_center() {
        // Center touches 4 lines.
        let board: Board = "....X....".parse().unwrap();
        assert_eq!(heuristic_score(&board, Player::X), 4);
        assert_eq!(heuristic_score(&board, Player::O), 0);
    }

    #[test]
    fn test_heuristic_mixed() {
        // X: 7, 8. O: 5.
        // Row 7-8-9 open two (+10); column 7-4-1 open one (+1);
        // column 8-5-2 and diagonal 7-5-3 blocked by O.
        let board: Board = "XX.|.O.|...".parse().unwrap();
        assert_eq!(heuristic_score(&board, Player::X), 11);
    }

    #[test]
    fn test_heuristic_complete_line() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        assert!(heuristic_score(&board, Player::X) >= COMPLETE_LINE_SCORE);
    }

    #[test]
    fn test_best_move_prefers_win_over_block() {
        // X can win at 9; O threatens 6.
        let board: Board = "XX.|OO.|X..".parse().unwrap();
        assert_eq!(best_move(&board, Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_best_move_blocks() {
        let board: Board = "OO.|.X.|..X".parse().unwrap();
        assert_eq!(best_move(&board, Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_best_move_center_then_corner_then_edge() {
        assert_eq!(best_move(&Board::new(), Player::X), Some(Position::Center));

        let board: Board = "....X....".parse().unwrap();
        assert_eq!(best_move(&board, Player::O), Some(Position::BottomLeft));

        // Center and corners taken, no threats: first free square.
        let board: Board = "XXO|OOX|X.O".parse().unwrap();
        assert_eq!(best_move(&board, Player::X), Some(Position::BottomCenter));
    }

    #[test]
    fn test_best_move_full_board() {
        let board: Board = "XOX|XOO|OXX".parse().unwrap();
        assert_eq!(best_move(&board, Player::X), None);
    }
}
