//! Win-line detection.

use super::Board;
use crate::color::PlayerColor;
use crate::coord::Coord;
use crate::topology::Direction;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// A winning run, from one end cell to the other (both inclusive).
///
/// Serialized as `[[x1, y1], [x2, y2]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Coord, Coord)", into = "(Coord, Coord)")]
pub struct Line {
    /// End reached walking the negative direction.
    pub start: Coord,
    /// End reached walking the positive direction.
    pub end: Coord,
}

impl Line {
    /// Creates a line between two cells.
    pub fn new(start: impl Into<Coord>, end: impl Into<Coord>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl From<(Coord, Coord)> for Line {
    fn from((start, end): (Coord, Coord)) -> Self {
        Self { start, end }
    }
}

impl From<Line> for (Coord, Coord) {
    fn from(line: Line) -> Self {
        (line.start, line.end)
    }
}

/// Every line through `at` of at least `n_in_a_row` cells of `color`.
///
/// All directions of the board's topology are tested; simultaneous wins are
/// all reported.
#[instrument(skip(board), fields(topology = %board.topology()))]
pub fn winning_lines(board: &Board, at: Coord, color: PlayerColor) -> Vec<Line> {
    board
        .topology()
        .directions()
        .iter()
        .filter_map(|&direction| run_through(board, at, color, direction))
        .collect()
}

fn run_through(board: &Board, at: Coord, color: PlayerColor, direction: Direction) -> Option<Line> {
    let (back, start) = walk(board, at, color, direction, -1);
    let (forward, end) = walk(board, at, color, direction, 1);

    let count = back + forward + 1;
    trace!(%direction, count, "Measured run");
    (count >= i64::from(*board.n_in_a_row())).then_some(Line { start, end })
}

/// Counts same-color cells beyond `at` in the `sign` direction, returning the
/// count and the last such cell. Stops at the edge of the coordinate space.
fn walk(
    board: &Board,
    at: Coord,
    color: PlayerColor,
    direction: Direction,
    sign: i64,
) -> (i64, Coord) {
    let mut count = 0;
    let mut last = at;
    while let Some(next) = direction
        .step(at, sign * (count + 1))
        .filter(|&cell| board.cell_at(cell) == Some(color))
    {
        count += 1;
        last = next;
    }
    (count, last)
}
