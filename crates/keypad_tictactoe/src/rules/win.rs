//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Orientation of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// A column.
    #[display("vertical")]
    Vertical,
    /// A row.
    #[display("horizontal")]
    Horizontal,
    /// Corner to corner through the center.
    #[display("diagonal")]
    Diagonal,
}

/// One of the 8 fixed three-in-a-row lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Position of this line in [`LINES`]; lower ranks win ties.
    pub rank: u8,
    /// Orientation.
    pub kind: LineKind,
    /// The three positions, as listed in the table.
    pub positions: [Position; 3],
}

impl WinningLine {
    const fn new(rank: u8, kind: LineKind, positions: [Position; 3]) -> Self {
        Self {
            rank,
            kind,
            positions,
        }
    }

    /// Returns the positions as keypad digits.
    pub fn keys(&self) -> [u8; 3] {
        self.positions.map(Position::key)
    }

    /// Returns true if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Returns the three squares of this line on `board`.
    pub fn squares(&self, board: &Board) -> [Square; 3] {
        self.positions.map(|pos| board.get(pos))
    }

    /// Returns the owner if all three squares hold the same mark.
    pub fn owner(&self, board: &Board) -> Option<Player> {
        match self.squares(board) {
            [Square::Occupied(a), Square::Occupied(b), Square::Occupied(c)] if a == b && b == c => {
                Some(a)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.keys();
        write!(f, "{} [{}, {}, {}]", self.kind, a, b, c)
    }
}

/// The winning lines in scan order: columns, then rows, then diagonals.
pub static LINES: [WinningLine; 8] = [
    // Columns
    WinningLine::new(
        0,
        LineKind::Vertical,
        [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    ),
    WinningLine::new(
        1,
        LineKind::Vertical,
        [Position::TopCenter, Position::Center, Position::BottomCenter],
    ),
    WinningLine::new(
        2,
        LineKind::Vertical,
        [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    ),
    // Rows
    WinningLine::new(
        3,
        LineKind::Horizontal,
        [Position::TopLeft, Position::TopCenter, Position::TopRight],
    ),
    WinningLine::new(
        4,
        LineKind::Horizontal,
        [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    ),
    WinningLine::new(
        5,
        LineKind::Horizontal,
        [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    ),
    // Diagonals
    WinningLine::new(
        6,
        LineKind::Diagonal,
        [Position::TopLeft, Position::Center, Position::BottomRight],
    ),
    WinningLine::new(
        7,
        LineKind::Diagonal,
        [Position::BottomLeft, Position::Center, Position::TopRight],
    ),
];

/// Returns the first completed line in table order with its owner.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, WinningLine)> {
    LINES
        .iter()
        .find_map(|line| line.owner(board).map(|player| (player, *line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let kinds: Vec<LineKind> = LINES.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Vertical,
                LineKind::Vertical,
                LineKind::Vertical,
                LineKind::Horizontal,
                LineKind::Horizontal,
                LineKind::Horizontal,
                LineKind::Diagonal,
                LineKind::Diagonal,
            ]
        );
        for (i, line) in LINES.iter().enumerate() {
            assert_eq!(line.rank as usize, i);
        }
        assert_eq!(LINES[6].keys(), [7, 5, 3]);
        assert_eq!(LINES[7].keys(), [1, 5, 9]);
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winning_line(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        let (player, line) = winning_line(&board).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line.keys(), [7, 8, 9]);
    }

    #[test]
    fn test_winner_diagonal() {
        let board: Board = "O..|.O.|..O".parse().unwrap();
        assert_eq!(winning_line(&board).map(|(p, _)| p), Some(Player::O));
    }

    #[test]
    fn test_columns_take_priority_over_rows() {
        // X completes column 7-4-1 and row 7-8-9 with one move at 7.
        let board: Board = "XXX|XOO|XOO".parse().unwrap();
        let (player, line) = winning_line(&board).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line.keys(), [7, 4, 1]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX.|...|...".parse().unwrap();
        assert_eq!(winning_line(&board), None);
    }
}
