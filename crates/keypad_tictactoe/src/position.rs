//! Keypad-layout positions for tic-tac-toe moves.

use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, named after the numeric keypad.
///
/// ```text
/// 7 | 8 | 9
/// 4 | 5 | 6
/// 1 | 2 | 3
/// ```
///
/// The set is closed: any external identifier goes through
/// [`Position::from_key`] and unknown keys never become a `Position`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (key 7)
    TopLeft,
    /// Top-center (key 8)
    TopCenter,
    /// Top-right (key 9)
    TopRight,
    /// Middle-left (key 4)
    MiddleLeft,
    /// Center (key 5)
    Center,
    /// Middle-right (key 6)
    MiddleRight,
    /// Bottom-left (key 1)
    BottomLeft,
    /// Bottom-center (key 2)
    BottomCenter,
    /// Bottom-right (key 3)
    BottomRight,
}

impl Position {
    /// All 9 positions in board declaration order (7, 8, 9, 4, 5, 6, 1, 2, 3).
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Corners in the order the advisor prefers them (1, 3, 7, 9).
    pub const CORNERS: [Position; 4] = [
        Position::BottomLeft,
        Position::BottomRight,
        Position::TopLeft,
        Position::TopRight,
    ];

    /// The center cell (key 5).
    pub const CENTER: Position = Position::Center;

    /// Get label for this position (for display).
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Returns the keypad digit (1-9) for this position.
    pub fn key(self) -> u8 {
        match self {
            Position::TopLeft => 7,
            Position::TopCenter => 8,
            Position::TopRight => 9,
            Position::MiddleLeft => 4,
            Position::Center => 5,
            Position::MiddleRight => 6,
            Position::BottomLeft => 1,
            Position::BottomCenter => 2,
            Position::BottomRight => 3,
        }
    }

    /// Creates a position from its keypad digit.
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            7 => Some(Position::TopLeft),
            8 => Some(Position::TopCenter),
            9 => Some(Position::TopRight),
            4 => Some(Position::MiddleLeft),
            5 => Some(Position::Center),
            6 => Some(Position::MiddleRight),
            1 => Some(Position::BottomLeft),
            2 => Some(Position::BottomCenter),
            3 => Some(Position::BottomRight),
            _ => None,
        }
    }

    /// Parse from a keypad digit or a label (case-insensitive).
    #[instrument]
    pub fn from_key_or_label(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(key) = s.parse::<u8>() {
            return Self::from_key(key);
        }

        let s_lower = s.to_lowercase();
        <Position as strum::IntoEnumIterator>::iter()
            .find(|pos| pos.label().to_lowercase() == s_lower)
    }

    /// Index into the board's backing array (declaration order, 0-8).
    pub(crate) fn index(self) -> usize {
        match self {
            Position::TopLeft => 0,
            Position::TopCenter => 1,
            Position::TopRight => 2,
            Position::MiddleLeft => 3,
            Position::Center => 4,
            Position::MiddleRight => 5,
            Position::BottomLeft => 6,
            Position::BottomCenter => 7,
            Position::BottomRight => 8,
        }
    }

    /// Filters positions by board state - returns only empty squares,
    /// in declaration order.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_legal(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
