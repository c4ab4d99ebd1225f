//! Keypad tic-tac-toe - pure game logic
//!
//! Positions follow the numeric keypad (7 8 9 / 4 5 6 / 1 2 3).
//!
//! # Architecture
//!
//! - **Board**: 9 squares keyed by [`Position`]
//! - **Rules**: fixed table of 8 winning lines, scanned columns first,
//!   then rows, then diagonals
//! - **Game**: turn alternation and the active/finished phase
//! - **Advisor**: single-ply heuristic move suggestions
//! - **Geometry**: stroke parameters for drawing the winning line
//! - **Snapshot**: export/import with integrity checks
//!
//! # Example
//!
//! ```
//! use keypad_tictactoe::{Game, Outcome, Player};
//!
//! let mut game = Game::new();
//! for key in [7, 1, 5, 2] {
//!     game.apply_key(key).unwrap();
//! }
//! let report = game.apply_key(3).unwrap();
//! assert_eq!(report.outcome.winner(), Some(Player::X));
//! assert!(matches!(report.outcome, Outcome::Win { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod game;
mod listener;
mod phases;
mod position;
mod snapshot;
mod types;

// Public modules (free functions)
pub mod advisor;
pub mod geometry;
pub mod invariants;
pub mod rules;

// Crate-level exports - Core types
pub use position::Position;
pub use types::{Board, BoardParseError, GameState, Player, Square};

// Crate-level exports - Rules and outcomes
pub use phases::{Outcome, Phase};
pub use rules::{LineKind, WinningLine, evaluate};

// Crate-level exports - Turn control
pub use action::{Move, MoveError, MoveReport};
pub use game::Game;
pub use listener::{GameListener, NoopListener, TracingListener};

// Crate-level exports - Geometry
pub use geometry::{CellRects, DrawDescriptor, GeometryError, LineType, Rect, TransformOrigin};

// Crate-level exports - Persistence
pub use snapshot::{BoardStats, IntegrityError, StateRecord};

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig, GeometryConfig};
