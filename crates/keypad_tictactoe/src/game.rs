//! Turn control for a single match.

use super::action::{Move, MoveError, MoveReport};
use super::advisor;
use super::config::EngineConfig;
use super::geometry::{self, CellRects, DrawDescriptor, GeometryError};
use super::invariants::{BoardInvariants, InvariantSet};
use super::listener::{GameListener, NoopListener};
use super::phases::{Outcome, Phase};
use super::rules;
use super::snapshot::{self, IntegrityError, StateRecord};
use super::types::GameState;
use super::Position;
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game engine.
///
/// Owns one [`GameState`] and is the only way to change it. Each call runs
/// to completion: validate, place the mark, classify the board, update turn
/// and phase, then notify the listener.
#[derive(Debug, Clone)]
pub struct Game<L = NoopListener> {
    state: GameState,
    config: EngineConfig,
    listener: L,
}

impl Game {
    /// Creates a new game with default configuration.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a new game with the given configuration.
    #[instrument]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_listener(config, NoopListener)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: GameListener> Game<L> {
    /// Creates a new game that reports events to `listener`.
    #[instrument(skip(listener))]
    pub fn with_listener(config: EngineConfig, listener: L) -> Self {
        Self {
            state: GameState::new(),
            config,
            listener,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Returns the listener mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Makes a move for the side to move at the square named by a keypad digit.
    #[instrument(skip(self))]
    pub fn apply_key(&mut self, key: u8) -> Result<MoveReport, MoveError> {
        let Some(position) = Position::from_key(key) else {
            debug!(key, "Rejected move: unknown position");
            return Err(MoveError::UnknownPosition(key));
        };
        self.apply_move(position)
    }

    /// Makes a move for the side to move at `position`.
    ///
    /// A rejected move leaves the game untouched. On a win or draw the game
    /// becomes finished and the turn is not passed.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: Position) -> Result<MoveReport, MoveError> {
        if !self.state.is_active() {
            debug!(%position, "Rejected move: game is over");
            return Err(MoveError::GameOver);
        }

        let player = self.state.turn();
        let mut board = self.state.board().clone();
        board
            .apply(position, player)
            .inspect_err(|e| debug!(error = %e, "Rejected move"))?;

        BoardInvariants::check_all(&board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%position, %player, %descriptions, "Rejected move: postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let outcome = rules::evaluate(&board);
        let (turn, phase) = match outcome {
            Outcome::InProgress { .. } => (player.opponent(), Phase::Active),
            Outcome::Win { .. } | Outcome::Draw => (player, Phase::Finished),
        };
        self.state = GameState::from_parts(board.clone(), turn, phase);

        self.listener.on_move(position, player);
        let reset_after = match outcome {
            Outcome::Win { player, line } => {
                info!(%player, %line, "Game won");
                self.listener.on_win(player, &line);
                None
            }
            Outcome::Draw => {
                let delay = self.config.draw_reset_delay();
                info!(reset_after_ms = *self.config.draw_reset_delay_ms(), "Game drawn");
                self.listener.on_draw(delay);
                Some(delay)
            }
            Outcome::InProgress { empty } => {
                debug!(%position, %player, empty, "Move applied");
                None
            }
        };

        Ok(MoveReport {
            action: Move::new(player, position),
            outcome,
            board,
            turn,
            reset_after,
        })
    }

    /// Starts over: empty board, X to move, active.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::new();
        info!("Game reset");
        self.listener.on_reset();
        &self.state
    }

    /// Advisor suggestion for the side to move; `None` once the game is over.
    #[instrument(skip(self))]
    pub fn suggest(&self) -> Option<Position> {
        if !self.state.is_active() {
            return None;
        }
        advisor::best_move(self.state.board(), self.state.turn())
    }

    /// Stroke over the winning line, measured from `source`.
    ///
    /// `None` unless the board holds a win.
    #[instrument(skip_all)]
    pub fn win_geometry<S: CellRects + ?Sized>(
        &self,
        source: &S,
    ) -> Option<Result<DrawDescriptor, GeometryError>> {
        let outcome = self.state.outcome();
        let line = outcome.line()?;
        Some(geometry::line_geometry_from(
            line,
            source,
            self.config.geometry(),
        ))
    }

    /// Copies the current state into a record.
    #[instrument(skip(self))]
    pub fn export_state(&self) -> StateRecord {
        snapshot::export(&self.state)
    }

    /// Replaces the current state with `record` if it passes validation.
    #[instrument(skip_all)]
    pub fn import_state(&mut self, record: &StateRecord) -> Result<(), IntegrityError> {
        snapshot::import(&mut self.state, record)
    }
}
