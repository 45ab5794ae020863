//! Board model: cell occupancy, bounds, gravity and win detection.

mod bounds;
mod win;

pub use bounds::{Bounds, ExpansionPolicy, Rect};
pub use win::{Line, winning_lines};

use crate::color::PlayerColor;
use crate::coord::{Coord, StorageKey};
use crate::options::{BoardSize, RoomOptions};
use crate::topology::GridTopology;
use derive_getters::Getters;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Floor of an unbounded gravity board: rows below `GRAVITY_FLOOR` are out.
pub const GRAVITY_FLOOR: i64 = 10;

/// Why a placement was refused. The display text is the reason reported to
/// the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// Color index outside the palette.
    #[display("Color must be between 0 and {}", PlayerColor::COUNT - 1)]
    InvalidColor(#[error(not(source))] u8),
    /// Outside the current bounds, or a full gravity column.
    #[display("Cell out of bounds.")]
    OutOfBounds,
    /// The cell already holds a piece.
    #[display("Cell already set")]
    Occupied,
}

/// A successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Where the piece landed (after gravity).
    pub at: Coord,
    /// The color placed.
    pub color: PlayerColor,
    /// Winning lines through the piece, when it completed at least one.
    pub winning_lines: Option<Vec<Line>>,
}

impl Placement {
    /// True when the placement won the game.
    pub fn is_win(&self) -> bool {
        self.winning_lines.is_some()
    }
}

/// An N-in-a-row board.
#[derive(Debug, Clone, Getters)]
pub struct Board {
    /// Run length needed to win.
    n_in_a_row: u32,
    /// Pieces drop to the lowest free row.
    gravity: bool,
    /// Cell shape.
    topology: GridTopology,
    /// Current playable region.
    bounds: Bounds,
    /// Growth policy for finite boards.
    expansion: ExpansionPolicy,
    #[getter(skip)]
    cells: BTreeMap<StorageKey, PlayerColor>,
    /// The most recent successful placement.
    last_placed: Option<Coord>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// Finite triangle boards store two rows per visual row, so their
    /// stored height is doubled. An unbounded gravity board gets a floor at
    /// [`GRAVITY_FLOOR`].
    #[instrument]
    pub fn new(n_in_a_row: u32, gravity: bool, topology: GridTopology, size: BoardSize) -> Self {
        let (bounds, expansion) = match size {
            BoardSize::Finite {
                width,
                height,
                expansion,
            } => (
                Bounds::sized(i64::from(width), i64::from(height) * topology.row_factor()),
                expansion,
            ),
            BoardSize::Infinite if gravity => (
                Bounds {
                    max_y: Some(GRAVITY_FLOOR),
                    ..Bounds::unbounded()
                },
                ExpansionPolicy::default(),
            ),
            BoardSize::Infinite => (Bounds::unbounded(), ExpansionPolicy::default()),
        };
        debug!(?bounds, ?expansion, "Created board");
        Self {
            n_in_a_row,
            gravity,
            topology,
            bounds,
            expansion,
            cells: BTreeMap::new(),
            last_placed: None,
        }
    }

    /// Creates the board described by room options.
    pub fn from_options(options: &RoomOptions) -> Self {
        Self::new(
            options.n_in_a_row,
            options.gravity,
            options.grid_topology,
            options.size,
        )
    }

    /// Whether `(x, y)` is inside the current bounds.
    pub fn within_bounds(&self, x: i64, y: i64) -> bool {
        self.bounds.contains(x, y)
    }

    /// Whether `(x, y)` holds a piece.
    pub fn has_cell(&self, x: i64, y: i64) -> bool {
        self.cell(x, y).is_some()
    }

    /// The color at `(x, y)`, if any.
    pub fn cell(&self, x: i64, y: i64) -> Option<PlayerColor> {
        self.cell_at(Coord::new(x, y))
    }

    /// The color at `at`, if any.
    pub fn cell_at(&self, at: Coord) -> Option<PlayerColor> {
        self.cells.get(&at.storage_key()).copied()
    }

    /// Number of pieces on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    /// Occupied cells in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, PlayerColor)> + '_ {
        self.cells.iter().map(|(key, color)| (key.coord(), *color))
    }

    /// Places `color` at `(x, y)`.
    ///
    /// With gravity the requested row is ignored and the piece drops to the
    /// lowest free row of column `x`. On success the board may grow, and the
    /// returned placement carries any winning lines through the new piece.
    #[instrument(skip(self), fields(topology = %self.topology))]
    pub fn set_cell(
        &mut self,
        x: i64,
        y: i64,
        color: PlayerColor,
    ) -> Result<Placement, PlacementError> {
        let y = if self.gravity {
            if !self.bounds.contains_column(x) {
                return Err(PlacementError::OutOfBounds);
            }
            self.gravity_row(x).ok_or(PlacementError::OutOfBounds)?
        } else {
            if !self.within_bounds(x, y) {
                return Err(PlacementError::OutOfBounds);
            }
            y
        };

        let at = Coord::new(x, y);
        let key = at.storage_key();
        if self.cells.contains_key(&key) {
            return Err(PlacementError::Occupied);
        }
        self.cells.insert(key, color);
        self.last_placed = Some(at);
        self.try_expand(at);

        let lines = winning_lines(self, at, color);
        if lines.is_empty() {
            debug!(%at, %color, "Cell set");
            return Ok(Placement {
                at,
                color,
                winning_lines: None,
            });
        }
        info!(%at, %color, lines = lines.len(), "Winning placement");
        Ok(Placement {
            at,
            color,
            winning_lines: Some(lines),
        })
    }

    /// Lowest free row of column `x`, scanning up from the floor.
    fn gravity_row(&self, x: i64) -> Option<i64> {
        let floor = self.bounds.max_y?.checked_sub(1)?;
        let top = self.bounds.min_y;
        let mut y = floor;
        while top.is_none_or(|min| y >= min) {
            if !self.has_cell(x, y) {
                return Some(y);
            }
            y = y.checked_sub(1)?;
        }
        None
    }

    fn try_expand(&mut self, at: Coord) {
        let cells = &self.cells;
        self.bounds.expand(
            at,
            &self.expansion,
            self.topology.row_factor(),
            !self.gravity,
            |band| {
                cells
                    .keys()
                    .filter(|key| band.contains(key.coord()))
                    .count() as u64
            },
        );
    }

    /// True when no further placement is possible: every edge is fixed, the
    /// board cannot grow, and every cell is taken. Boards that are unbounded
    /// or can still expand are never full.
    pub fn is_full(&self) -> bool {
        if self.expansion.is_enabled() {
            return false;
        }
        match self.bounds.rect() {
            Some(rect) => self.cells.len() as u64 >= rect.area(),
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = (Coord, PlayerColor);
    type IntoIter = Box<dyn Iterator<Item = (Coord, PlayerColor)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
