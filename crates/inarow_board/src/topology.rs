//! Grid topologies and the line directions each one scores.

use crate::coord::{Coord, cartesian_to_hex, hex_to_cartesian, is_even_row};
use serde::{Deserialize, Serialize};

/// Shape of the cells making up a board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GridTopology {
    /// Square cells, eight neighbours.
    #[default]
    Square,
    /// Hexagonal cells on a sheared (axial) grid.
    Hex,
    /// Triangles; even rows point up, odd rows point down.
    Triangle,
}

/// An axis along which a run of same-colored cells is counted.
///
/// Each direction is a walk `step(origin, i)` where negative `i` walks one
/// way and positive `i` the other; `i = 0` is the origin itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Direction {
    /// `(x ± i, y)`.
    Horizontal,
    /// `(x, y ± i)`.
    Vertical,
    /// `(x + i, y + i)`.
    DiagonalDownhill,
    /// `(x + i, y - i)`.
    DiagonalUphill,
    /// Zig-zag along a triangle row pair.
    TriangleHorizontal,
    /// Steep line through alternating triangle orientations.
    TriangleVertical,
    /// Shallow rising line across triangle rows.
    TriangleUpDown,
    /// Falling line across triangle rows.
    TriangleDownhill,
}

const SQUARE_DIRECTIONS: &[Direction] = &[
    Direction::Horizontal,
    Direction::Vertical,
    Direction::DiagonalDownhill,
    Direction::DiagonalUphill,
];

const HEX_DIRECTIONS: &[Direction] = &[
    Direction::Horizontal,
    Direction::Vertical,
    Direction::DiagonalUphill,
];

const TRIANGLE_DIRECTIONS: &[Direction] = &[
    Direction::TriangleHorizontal,
    Direction::Vertical,
    Direction::TriangleVertical,
    Direction::DiagonalUphill,
    Direction::TriangleUpDown,
    Direction::TriangleDownhill,
];

impl GridTopology {
    /// Directions tested by win detection for this topology.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Square => SQUARE_DIRECTIONS,
            Self::Hex => HEX_DIRECTIONS,
            Self::Triangle => TRIANGLE_DIRECTIONS,
        }
    }

    /// Number of stored rows per visual row.
    pub fn row_factor(self) -> i64 {
        match self {
            Self::Triangle => 2,
            Self::Square | Self::Hex => 1,
        }
    }

    /// Maps a point in grid space (one unit per cell) to the cell under it.
    pub fn cell_at_point(self, px: f64, py: f64) -> Coord {
        match self {
            Self::Square | Self::Triangle => Coord::new(px.floor() as i64, py.floor() as i64),
            Self::Hex => {
                let (_, y) = hex_to_cartesian(px, py);
                let row = y.floor();
                Coord::new((px - row / 2.0).floor() as i64, row as i64)
            }
        }
    }

    /// Top-left drawing origin of a cell in grid space.
    pub fn cell_origin(self, cell: Coord) -> (f64, f64) {
        match self {
            Self::Square | Self::Triangle => (cell.x as f64, cell.y as f64),
            Self::Hex => cartesian_to_hex(cell.x as f64, cell.y as f64),
        }
    }
}

impl Direction {
    /// The cell `i` steps away from `origin` along this direction, or `None`
    /// when that cell lies outside the `i64` coordinate space.
    pub fn step(self, origin: Coord, i: i64) -> Option<Coord> {
        let Coord { x, y } = origin;
        let even = is_even_row(y);
        let (x, y) = match self {
            Self::Horizontal => (x.checked_add(i)?, y),
            Self::Vertical => (x, y.checked_add(i)?),
            Self::DiagonalDownhill => (x.checked_add(i)?, y.checked_add(i)?),
            Self::DiagonalUphill => (x.checked_add(i)?, y.checked_sub(i)?),
            Self::TriangleHorizontal => return triangle_horizontal(x, y, even, i),
            Self::TriangleVertical => (x.checked_add(half_step(i, even)?)?, y.checked_sub(i)?),
            Self::TriangleUpDown => {
                let h = half_step(i, even)?;
                (x.checked_add(h)?, y.checked_sub(i)?.checked_sub(h.checked_mul(2)?)?)
            }
            Self::TriangleDownhill => (x.checked_add(half_step(i, even)?)?, y.checked_add(i)?),
        };
        Some(Coord::new(x, y))
    }
}

/// `floor(i / 2)` on even rows, `floor((i + 1) / 2)` on odd rows.
fn half_step(i: i64, even: bool) -> Option<i64> {
    if even {
        Some(i.div_euclid(2))
    } else {
        Some(i.checked_add(1)?.div_euclid(2))
    }
}

fn triangle_horizontal(x: i64, y: i64, even: bool, i: i64) -> Option<Coord> {
    let k = i.checked_abs()?;
    let row = k % 2;
    let (x, y) = match (even, i < 0) {
        (true, true) => (x.checked_sub(k / 2 + row)?, y.checked_add(row)?),
        (true, false) => (x.checked_add(k / 2)?, y.checked_add(row)?),
        (false, true) => (x.checked_sub(k / 2)?, y.checked_sub(row)?),
        (false, false) => (x.checked_add(k / 2 + row)?, y.checked_sub(row)?),
    };
    Some(Coord::new(x, y))
}
