//! Grid coordinates, storage indices and grid-geometry transforms.
//!
//! Logical coordinates are signed and may grow without limit in every
//! direction. Cells are stored under a pair of non-negative storage indices
//! produced by a zig-zag encoding, so a board never has to renumber its cells
//! when it grows towards negative coordinates.

use serde::{Deserialize, Serialize};

const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;
const DBL_INV_SQRT_3: f64 = 1.154_700_538_379_251_5;

/// A signed grid coordinate.
///
/// Serialized as a two element array `[x, y]`, which is the shape the wire
/// protocol uses for placements and winning-line endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Coord {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the storage key for this coordinate.
    pub fn storage_key(self) -> StorageKey {
        StorageKey(to_storage_index(self.x), to_storage_index(self.y))
    }

    /// True when the row holds upward-pointing triangles on a triangle grid.
    pub fn is_even_row(self) -> bool {
        is_even_row(self.y)
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (i64, i64) {
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dense, non-negative key of a stored cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(pub u64, pub u64);

impl StorageKey {
    /// Recovers the logical coordinate.
    pub fn coord(self) -> Coord {
        Coord::new(from_storage_index(self.0), from_storage_index(self.1))
    }
}

/// Maps a signed coordinate component to a storage index.
///
/// Non-negative values map to even indices (`n -> 2n`), negative values to
/// odd ones (`n -> 2|n| - 1`).
pub const fn to_storage_index(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`to_storage_index`].
pub const fn from_storage_index(i: u64) -> i64 {
    ((i >> 1) as i64) ^ -((i & 1) as i64)
}

/// Row parity with Euclidean remainder, so `-1` is odd and `-2` is even.
pub const fn is_even_row(y: i64) -> bool {
    y.rem_euclid(2) == 0
}

/// Transforms a cartesian grid point into hex drawing space.
pub fn cartesian_to_hex(x: f64, y: f64) -> (f64, f64) {
    (x + y / 2.0, y * HALF_SQRT_3)
}

/// Transforms a point in hex drawing space back onto the cartesian grid.
pub fn hex_to_cartesian(x: f64, y: f64) -> (f64, f64) {
    let y = y * DBL_INV_SQRT_3;
    (x - y / 2.0, y)
}
