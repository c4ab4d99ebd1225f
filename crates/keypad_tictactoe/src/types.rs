//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::phases::{Outcome, Phase};
use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Text form used by snapshots: `' '`, `'X'` or `'O'`.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Inverse of [`Square::symbol`].
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Square::Empty),
            'X' => Some(Square::Occupied(Player::X)),
            'O' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }

    /// Returns true if `player` holds this square.
    pub fn is(self, player: Player) -> bool {
        self == Square::Occupied(player)
    }
}

/// 3x3 tic-tac-toe board keyed by [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in declaration order (7, 8, 9, 4, 5, 6, 1, 2, 3).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from squares in declaration order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Sets the square at the given position, bypassing move legality.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_legal(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks a raw keypad digit: it must name a position and that square must be empty.
    #[instrument(skip(self))]
    pub fn is_legal_key(&self, key: u8) -> bool {
        Position::from_key(key).is_some_and(|pos| self.is_legal(pos))
    }

    /// Places `player`'s mark on an empty square.
    ///
    /// An occupied square is rejected and the board is left unchanged.
    #[instrument(skip(self))]
    pub fn apply(&mut self, pos: Position, player: Player) -> Result<(), MoveError> {
        if !self.is_legal(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.set(pos, Square::Occupied(player));
        Ok(())
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares.iter().filter(|s| s.is(player)).count()
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Square::Empty).count()
    }

    /// Empty squares in declaration order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Iterates `(position, square)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Square)> + '_ {
        Position::ALL.iter().map(|&pos| (pos, self.get(pos)))
    }

    /// Formats the board as a human-readable string, keypad-shaped.
    ///
    /// Empty squares show their key so the grid doubles as an input legend.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (i, (pos, square)) in self.iter().enumerate() {
            match square {
                Square::Empty => result.push_str(&pos.key().to_string()),
                Square::Occupied(player) => result.push(player.symbol()),
            }
            match i % 3 {
                2 if i < 8 => result.push_str("\n-+-+-\n"),
                2 => {}
                _ => result.push('|'),
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Wrong number of cells.
    #[display("expected 9 cells, found {}", _0)]
    CellCount(#[error(not(source))] usize),
    /// A character that is neither a mark nor an empty marker.
    #[display("unrecognized cell symbol {:?}", _0)]
    Symbol(#[error(not(source))] char),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses 9 cells in declaration order (top row first).
    ///
    /// `X`/`O` (either case) are marks; `.`, `-`, `_` and space are empty.
    /// `|`, `/` and newlines are treated as separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars().filter(|c| !matches!(c, '|' | '/' | '\n' | '\r')) {
            let square = match c {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' | ' ' => Square::Empty,
                other => return Err(BoardParseError::Symbol(other)),
            };
            squares.push(square);
        }
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::CellCount(v.len()))?;
        Ok(Self::from_squares(squares))
    }
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player allowed to move next.
    turn: Player,
    /// Whether moves are still accepted.
    phase: Phase,
}

impl GameState {
    /// Creates a fresh state: empty board, X to move, active.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            phase: Phase::Active,
        }
    }

    pub(crate) fn from_parts(board: Board, turn: Player, phase: Phase) -> Self {
        Self { board, turn, phase }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Classifies the current board.
    pub fn outcome(&self) -> Outcome {
        super::rules::evaluate(&self.board)
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        if self.is_active() {
            return format!("{} to move", self.turn);
        }
        match self.outcome() {
            Outcome::Win { player, .. } => format!("{} wins", player),
            Outcome::Draw => "Draw".to_string(),
            Outcome::InProgress { .. } => "Game over".to_string(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
