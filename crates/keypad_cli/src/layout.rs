//! Terminal stand-in for a rendered board.

use keypad_tictactoe::{CellRects, Position, Rect};

/// Regular grid of square cells, key 7 at the origin.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    cell_size: f64,
}

impl GridLayout {
    /// Creates a grid of `cell_size` x `cell_size` cells.
    pub fn new(cell_size: f64) -> Self {
        Self { cell_size }
    }
}

impl CellRects for GridLayout {
    fn rect(&self, position: Position) -> Option<Rect> {
        let (row, col) = match position.key() {
            7..=9 => (0.0, f64::from(position.key() - 7)),
            4..=6 => (1.0, f64::from(position.key() - 4)),
            1..=3 => (2.0, f64::from(position.key() - 1)),
            _ => return None,
        };
        let size = self.cell_size;
        Some(Rect::new(
            col * size,
            row * size,
            (col + 1.0) * size,
            (row + 1.0) * size,
        ))
    }
}
