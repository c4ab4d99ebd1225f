//! Win-line geometry.
//!
//! Turns a winning line plus the on-screen rectangles of its three cells into
//! the parameters needed to draw a stroke across them. The rendering side
//! measures the cells and applies the result; nothing here knows how.

use super::config::GeometryConfig;
use super::rules::WinningLine;
use super::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{error, instrument};

/// Axis-aligned rectangle of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    fn reading_order(a: &Rect, b: &Rect) -> Ordering {
        a.top.total_cmp(&b.top).then(a.left.total_cmp(&b.left))
    }
}

/// Supplies cell rectangles, usually measured from a rendered board.
pub trait CellRects {
    /// Rectangle of the cell at `position`, if it is currently laid out.
    fn rect(&self, position: Position) -> Option<Rect>;
}

impl CellRects for [(Position, Rect)] {
    fn rect(&self, position: Position) -> Option<Rect> {
        self.iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, rect)| *rect)
    }
}

/// Orientation of the stroke to draw.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// Left to right across a row.
    #[display("horizontal")]
    Horizontal,
    /// Top to bottom down a column.
    #[display("vertical")]
    Vertical,
    /// Rotated stroke between two corners.
    #[display("diagonal")]
    Diagonal,
}

/// Point the rotation is applied around.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformOrigin {
    /// Center of the stroke box (no rotation is applied).
    #[display("center")]
    Center,
    /// Start of the stroke, vertically centered.
    #[display("left center")]
    StartCenter,
}

/// How to draw the line over a win.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawDescriptor {
    /// Orientation.
    pub line_type: LineType,
    /// Left edge of the unrotated stroke box.
    pub left: f64,
    /// Top edge of the unrotated stroke box.
    pub top: f64,
    /// Width of the unrotated stroke box.
    pub width: f64,
    /// Height of the unrotated stroke box.
    pub height: f64,
    /// Clockwise rotation in degrees (screen coordinates, y down).
    pub rotation_degrees: f64,
    /// Rotation origin.
    pub transform_origin: TransformOrigin,
}

/// Geometry could not be derived.
///
/// Both variants mean the cell layout or the line table is broken; callers
/// should treat them as bugs, not as conditions to retry.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum GeometryError {
    /// The three cells are neither in a row nor in a column.
    #[display("cells of {} are neither row- nor column-aligned", line)]
    Unaligned {
        /// The offending line.
        line: WinningLine,
    },
    /// The rectangle source had no rectangle for a cell of the line.
    #[display("no rectangle for cell {}", position)]
    MissingRect {
        /// The cell without a rectangle.
        position: Position,
    },
}

/// Returns true for the two corner-to-corner lines, judged by position set.
fn is_diagonal(line: &WinningLine) -> bool {
    let mut keys = line.keys();
    keys.sort_unstable();
    keys == [3, 5, 7] || keys == [1, 5, 9]
}

fn within(values: [f64; 3], tolerance: f64) -> bool {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min < tolerance
}

/// Computes the stroke for `line` from the rectangles of its cells.
///
/// `rects` follows the order of `line.positions`. Diagonals are recognized
/// by their positions alone; rows and columns by center alignment within
/// `config.tolerance`. Exactly one of the two alignments must hold: cells
/// aligned both ways (stacked on each other) are [`GeometryError::Unaligned`].
#[instrument(skip_all, fields(line = %line))]
pub fn line_geometry(
    line: &WinningLine,
    rects: [Rect; 3],
    config: &GeometryConfig,
) -> Result<DrawDescriptor, GeometryError> {
    let thickness = *config.thickness();
    let tolerance = *config.tolerance();

    let mut sorted = rects;
    sorted.sort_by(Rect::reading_order);

    if is_diagonal(line) {
        let [start, _, end] = sorted;
        let (start_x, start_y) = (start.center_x(), start.center_y());
        let dx = end.center_x() - start_x;
        let dy = end.center_y() - start_y;
        return Ok(DrawDescriptor {
            line_type: LineType::Diagonal,
            left: start_x,
            top: start_y - thickness / 2.0,
            width: dx.hypot(dy),
            height: thickness,
            rotation_degrees: dy.atan2(dx).to_degrees(),
            transform_origin: TransformOrigin::StartCenter,
        });
    }

    let centers_x = sorted.map(|r| r.center_x());
    let centers_y = sorted.map(|r| r.center_y());
    let in_row = within(centers_y, tolerance);
    let in_column = within(centers_x, tolerance);

    if in_row && !in_column {
        let left = sorted.iter().map(|r| r.left).fold(f64::INFINITY, f64::min);
        let right = sorted.iter().map(|r| r.right).fold(f64::NEG_INFINITY, f64::max);
        let mid_y = centers_y.iter().sum::<f64>() / 3.0;
        return Ok(DrawDescriptor {
            line_type: LineType::Horizontal,
            left,
            top: mid_y - thickness / 2.0,
            width: right - left,
            height: thickness,
            rotation_degrees: 0.0,
            transform_origin: TransformOrigin::Center,
        });
    }

    if in_column && !in_row {
        let top = sorted.iter().map(|r| r.top).fold(f64::INFINITY, f64::min);
        let bottom = sorted.iter().map(|r| r.bottom).fold(f64::NEG_INFINITY, f64::max);
        let mid_x = centers_x.iter().sum::<f64>() / 3.0;
        return Ok(DrawDescriptor {
            line_type: LineType::Vertical,
            left: mid_x - thickness / 2.0,
            top,
            width: thickness,
            height: bottom - top,
            rotation_degrees: 0.0,
            transform_origin: TransformOrigin::Center,
        });
    }

    error!(kind = %line.kind, in_row, in_column, ?rects, "Winning cells are not aligned");
    Err(GeometryError::Unaligned { line: *line })
}

/// Looks up the cells of `line` in `source` and computes the stroke.
#[instrument(skip_all, fields(line = %line))]
pub fn line_geometry_from<S: CellRects + ?Sized>(
    line: &WinningLine,
    source: &S,
    config: &GeometryConfig,
) -> Result<DrawDescriptor, GeometryError> {
    let mut rects = [Rect::new(0.0, 0.0, 0.0, 0.0); 3];
    for (slot, &position) in rects.iter_mut().zip(line.positions.iter()) {
        *slot = source.rect(position).ok_or_else(|| {
            error!(%position, "Rectangle source is missing a winning cell");
            GeometryError::MissingRect { position }
        })?;
    }
    line_geometry(line, rects, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{LINES, LineKind};

    const CELL: f64 = 100.0;

    /// Regular 3x3 grid of 100x100 cells with no gaps, key 7 at the origin.
    fn grid(position: Position) -> Rect {
        let i = position.index();
        let (row, col) = ((i / 3) as f64, (i % 3) as f64);
        Rect::new(col * CELL, row * CELL, (col + 1.0) * CELL, (row + 1.0) * CELL)
    }

    fn rects_for(line: &WinningLine) -> [Rect; 3] {
        line.positions.map(grid)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_top_row_is_horizontal() {
        let line = LINES[3];
        let d = line_geometry(&line, rects_for(&line), &GeometryConfig::default()).unwrap();
        assert_eq!(d.line_type, LineType::Horizontal);
        assert!(close(d.left, 0.0));
        assert!(close(d.width, 300.0));
        assert!(close(d.top, 48.0));
        assert!(close(d.height, 4.0));
        assert_eq!(d.rotation_degrees, 0.0);
    }

    #[test]
    fn test_middle_column_is_vertical() {
        let line = LINES[1];
        let d = line_geometry(&line, rects_for(&line), &GeometryConfig::default()).unwrap();
        assert_eq!(d.line_type, LineType::Vertical);
        assert!(close(d.left, 148.0));
        assert!(close(d.top, 0.0));
        assert!(close(d.width, 4.0));
        assert!(close(d.height, 300.0));
    }

    #[test]
    fn test_diagonal_7_5_3() {
        let line = LINES[6];
        let d = line_geometry(&line, rects_for(&line), &GeometryConfig::default()).unwrap();
        assert_eq!(d.line_type, LineType::Diagonal);
        assert!(close(d.left, 50.0));
        assert!(close(d.top, 48.0));
        assert!(close(d.width, 200.0 * 2f64.sqrt()));
        assert!(close(d.rotation_degrees, 45.0));
        assert_eq!(d.transform_origin, TransformOrigin::StartCenter);
    }

    #[test]
    fn test_diagonal_1_5_9_rises() {
        let line = LINES[7];
        let d = line_geometry(&line, rects_for(&line), &GeometryConfig::default()).unwrap();
        // Sorted by (top, left) the stroke starts at key 9 and runs down-left.
        assert!(close(d.left, 250.0));
        assert!(close(d.top, 48.0));
        assert!(close(d.rotation_degrees, 135.0));
    }

    #[test]
    fn test_diagonal_by_positions_not_geometry() {
        // Rectangles laid out as a row still produce a diagonal for 7-5-3.
        let line = LINES[6];
        let row = LINES[3].positions.map(grid);
        let d = line_geometry(&line, row, &GeometryConfig::default()).unwrap();
        assert_eq!(d.line_type, LineType::Diagonal);
        assert!(close(d.rotation_degrees, 0.0));
    }

    #[test]
    fn test_tolerance_absorbs_jitter() {
        let line = LINES[4];
        let mut rects = rects_for(&line);
        rects[1].top += 3.0;
        rects[1].bottom += 3.0;
        let d = line_geometry(&line, rects, &GeometryConfig::default()).unwrap();
        assert_eq!(d.line_type, LineType::Horizontal);
        assert!(close(d.top, 150.0 + 1.0 - 2.0));
    }

    #[test]
    fn test_unaligned_is_error() {
        let line = LINES[0];
        let rects = [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(100.0, 100.0, 200.0, 200.0),
            Rect::new(0.0, 200.0, 100.0, 300.0),
        ];
        assert_eq!(
            line_geometry(&line, rects, &GeometryConfig::default()),
            Err(GeometryError::Unaligned { line })
        );
    }

    #[test]
    fn test_missing_rect() {
        let line = LINES[0];
        let partial: Vec<(Position, Rect)> = vec![
            (Position::TopLeft, grid(Position::TopLeft)),
            (Position::MiddleLeft, grid(Position::MiddleLeft)),
        ];
        assert_eq!(
            line_geometry_from(&line, partial.as_slice(), &GeometryConfig::default()),
            Err(GeometryError::MissingRect {
                position: Position::BottomLeft
            })
        );
    }

    #[test]
    fn test_every_line_matches_its_kind_on_a_grid() {
        for line in &LINES {
            let d = line_geometry(line, rects_for(line), &GeometryConfig::default()).unwrap();
            let expected = match line.kind {
                LineKind::Horizontal => LineType::Horizontal,
                LineKind::Vertical => LineType::Vertical,
                LineKind::Diagonal => LineType::Diagonal,
            };
            assert_eq!(d.line_type, expected, "{line}");
        }
    }

    /// Top row with the middle cell shifted down by `shift`.
    fn shifted_row(shift: f64) -> [Rect; 3] {
        let mut rects = rects_for(&LINES[3]);
        rects[1].top += shift;
        rects[1].bottom += shift;
        rects
    }

    /// Left column with the middle cell shifted right by `shift`.
    fn shifted_column(shift: f64) -> [Rect; 3] {
        let mut rects = rects_for(&LINES[0]);
        rects[1].left += shift;
        rects[1].right += shift;
        rects
    }

    #[test]
    fn test_spread_at_tolerance_is_unaligned() {
        let config = GeometryConfig::default();
        assert_eq!(
            line_geometry(&LINES[3], shifted_row(5.0), &config),
            Err(GeometryError::Unaligned { line: LINES[3] })
        );
        assert_eq!(
            line_geometry(&LINES[0], shifted_column(5.0), &config),
            Err(GeometryError::Unaligned { line: LINES[0] })
        );
    }

    #[test]
    fn test_spread_under_tolerance_is_aligned() {
        let config = GeometryConfig::default();
        let row = line_geometry(&LINES[3], shifted_row(4.5), &config).unwrap();
        assert_eq!(row.line_type, LineType::Horizontal);
        let column = line_geometry(&LINES[0], shifted_column(4.5), &config).unwrap();
        assert_eq!(column.line_type, LineType::Vertical);
    }

    #[test]
    fn test_stacked_cells_are_unaligned() {
        let line = LINES[3];
        let cell = grid(Position::TopLeft);
        assert_eq!(
            line_geometry(&line, [cell; 3], &GeometryConfig::default()),
            Err(GeometryError::Unaligned { line })
        );
    }
}
