//! Serializable snapshots of a game.
//!
//! A [`StateRecord`] is the persistence boundary: a plain copy of board,
//! turn and phase with a few derived counts. Importing one validates it
//! first and only then replaces the live state.

use super::invariants::{Invariant, SingleWinnerInvariant, SymbolBalanceInvariant};
use super::phases::{Outcome, Phase};
use super::rules;
use super::types::{Board, GameState, Player, Square};
use super::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Derived counts for a board.
///
/// Percentages are of the 9 squares, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardStats {
    /// Number of squares (always 9).
    pub total: usize,
    /// Empty squares.
    pub empty: usize,
    /// Squares held by X.
    pub x: usize,
    /// Squares held by O.
    pub o: usize,
    /// Occupied squares.
    pub filled: usize,
    /// Share of squares held by X.
    pub x_percent: f64,
    /// Share of squares held by O.
    pub o_percent: f64,
    /// Share of empty squares.
    pub empty_percent: f64,
}

impl BoardStats {
    /// Computes the stats of `board`.
    pub fn of(board: &Board) -> Self {
        let total = board.squares().len();
        let empty = board.empty_count();
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        let percent = |n: usize| (n as f64 / total as f64 * 100.0 * 100.0).round() / 100.0;
        Self {
            total,
            empty,
            x,
            o,
            filled: total - empty,
            x_percent: percent(x),
            o_percent: percent(o),
            empty_percent: percent(empty),
        }
    }
}

/// Exported game state.
///
/// `board` maps keypad digits to `"X"`, `"O"` or `" "`. `stats` is written
/// for readers and ignored on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Cell text by keypad digit.
    pub board: BTreeMap<u8, String>,
    /// Player to move.
    pub turn: Player,
    /// Whether the game accepts moves.
    pub active: bool,
    /// Derived counts.
    pub stats: BoardStats,
}

impl StateRecord {
    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a record from JSON. The record is not validated yet.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, IntegrityError> {
        serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Rejected malformed state record");
            IntegrityError::Malformed(e.to_string())
        })
    }
}

/// Why a record was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum IntegrityError {
    /// A position has no entry.
    #[display("position {} is missing", _0)]
    MissingPosition(#[error(not(source))] u8),

    /// An entry is keyed by something that is not a position.
    #[display("unknown position key {}", _0)]
    UnknownPosition(#[error(not(source))] u8),

    /// A cell holds something other than `"X"`, `"O"` or `" "`.
    #[display("invalid cell value {:?} at position {}", value, key)]
    InvalidCell {
        /// Keypad digit of the cell.
        key: u8,
        /// The offending text.
        value: String,
    },

    /// The marks could not have come from alternating play.
    #[display("invalid state: X={}, O={}", x, o)]
    SymbolCount {
        /// Marks held by X.
        x: usize,
        /// Marks held by O.
        o: usize,
    },

    /// Both players own a completed line.
    #[display("invalid state: both players own a completed line")]
    BothWin,

    /// `active` disagrees with the board: a won or full board marked
    /// active, or an open board marked finished.
    #[display("record says active={} but the board is {}", active, outcome)]
    PhaseMismatch {
        /// The record's flag.
        active: bool,
        /// What the board actually shows.
        outcome: Outcome,
    },

    /// The winner did not make the last move.
    #[display("{} owns a line but {} moved last", winner, last)]
    WinnerNotLast {
        /// Owner of the completed line.
        winner: Player,
        /// Player the counts say moved last.
        last: Player,
    },

    /// `turn` disagrees with the mark counts.
    #[display("record has {} to move but the counts give {}", turn, expected)]
    TurnMismatch {
        /// The record's turn.
        turn: Player,
        /// Turn implied by the counts and phase.
        expected: Player,
    },

    /// The record text could not be parsed.
    #[display("malformed record: {}", _0)]
    Malformed(#[error(not(source))] String),
}

fn parse_cell(key: u8, value: &str) -> Result<Square, IntegrityError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Square::from_symbol(c),
        _ => None,
    }
    .ok_or_else(|| IntegrityError::InvalidCell {
        key,
        value: value.to_string(),
    })
}

/// Checks a record and rebuilds its board.
///
/// Checks run in order: unknown keys, missing keys, cell text, mark counts,
/// a single winner, `active` against the board, the winner against the last
/// mover, and finally `turn` against the counts.
#[instrument(skip(record))]
pub fn validate(record: &StateRecord) -> Result<Board, IntegrityError> {
    if let Some(&key) = record.board.keys().find(|k| Position::from_key(**k).is_none()) {
        return Err(IntegrityError::UnknownPosition(key));
    }

    let mut board = Board::new();
    for pos in Position::ALL {
        let value = record
            .board
            .get(&pos.key())
            .ok_or(IntegrityError::MissingPosition(pos.key()))?;
        board.set(pos, parse_cell(pos.key(), value)?);
    }

    if let Some((x, o)) = SymbolBalanceInvariant::imbalance(&board) {
        return Err(IntegrityError::SymbolCount { x, o });
    }
    if !SingleWinnerInvariant::holds(&board) {
        return Err(IntegrityError::BothWin);
    }

    let outcome = rules::evaluate(&board);
    if record.active == outcome.is_terminal() {
        return Err(IntegrityError::PhaseMismatch {
            active: record.active,
            outcome,
        });
    }

    // X moves first, so equal counts mean O moved last.
    let last = if board.count(Player::X) > board.count(Player::O) {
        Player::X
    } else {
        Player::O
    };
    match outcome.winner() {
        Some(winner) if winner != last => {
            return Err(IntegrityError::WinnerNotLast { winner, last });
        }
        _ => {}
    }

    // A finished game keeps the turn with the player who ended it.
    let expected = if record.active { last.opponent() } else { last };
    if record.turn != expected {
        return Err(IntegrityError::TurnMismatch {
            turn: record.turn,
            expected,
        });
    }

    Ok(board)
}

/// Copies `state` into a record.
#[instrument(skip(state))]
pub fn export(state: &GameState) -> StateRecord {
    let board = state
        .board()
        .iter()
        .map(|(pos, square)| (pos.key(), square.symbol().to_string()))
        .collect();
    StateRecord {
        board,
        turn: state.turn(),
        active: state.is_active(),
        stats: BoardStats::of(state.board()),
    }
}

/// Replaces `state` with the contents of `record`.
///
/// Nothing changes unless the whole record is valid.
#[instrument(skip(state, record))]
pub fn import(state: &mut GameState, record: &StateRecord) -> Result<(), IntegrityError> {
    let board = validate(record).inspect_err(|e| warn!(error = %e, "Rejected state record"))?;
    let phase = if record.active {
        Phase::Active
    } else {
        Phase::Finished
    };
    *state = GameState::from_parts(board, record.turn, phase);
    info!(turn = %record.turn, active = record.active, "State imported");
    Ok(())
}
