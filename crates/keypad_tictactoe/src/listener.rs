//! Notification port for game events.
//!
//! Sound cues, animations and win tallies live outside the engine. They hook
//! in here; every method defaults to doing nothing, and none can fail.

use super::rules::WinningLine;
use super::{Player, Position};
use std::time::Duration;
use tracing::info;

/// Receives notifications from a [`Game`](crate::Game).
///
/// Called after the state change is committed, once per event.
pub trait GameListener {
    /// A mark was placed.
    fn on_move(&mut self, _position: Position, _player: Player) {}

    /// `player` completed `line`; the game is finished.
    fn on_win(&mut self, _player: Player, _line: &WinningLine) {}

    /// The board filled up without a winner. The board should be reset
    /// after `reset_after`; scheduling that is up to the listener's owner.
    fn on_draw(&mut self, _reset_after: Duration) {}

    /// The game was reset to a fresh state.
    fn on_reset(&mut self) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl GameListener for NoopListener {}

/// Listener that logs every event through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl GameListener for TracingListener {
    fn on_move(&mut self, position: Position, player: Player) {
        info!(%position, %player, "Mark placed");
    }

    fn on_win(&mut self, player: Player, line: &WinningLine) {
        info!(%player, %line, "Game won");
    }

    fn on_draw(&mut self, reset_after: Duration) {
        info!(reset_after_ms = reset_after.as_millis() as u64, "Game drawn");
    }

    fn on_reset(&mut self) {
        info!("Game reset");
    }
}

impl<L: GameListener + ?Sized> GameListener for &mut L {
    fn on_move(&mut self, position: Position, player: Player) {
        (**self).on_move(position, player);
    }

    fn on_win(&mut self, player: Player, line: &WinningLine) {
        (**self).on_win(player, line);
    }

    fn on_draw(&mut self, reset_after: Duration) {
        (**self).on_draw(reset_after);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}
