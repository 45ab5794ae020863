//! Board bounds and the expansion policy for growing boards.

use crate::coord::Coord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When a finite board grows.
///
/// A placement within `margin` cells of an edge pushes that edge out so that
/// `margin` free cells remain beyond the placement. When `density` is
/// non-zero the margin band along that edge must also hold at least that
/// many pieces (or that percentage of its cells when `density_is_percent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpansionPolicy {
    /// Cells from an edge that trigger growth; 0 disables expansion.
    pub margin: u32,
    /// Occupancy needed in the margin band; 0 disables the gate.
    pub density: u32,
    /// Read `density` as a percentage of the band's area.
    pub density_is_percent: bool,
}

impl ExpansionPolicy {
    /// True when the board can grow at all.
    pub fn is_enabled(&self) -> bool {
        self.margin > 0
    }

    fn admits(&self, occupied: u64, area: u64) -> bool {
        if self.density == 0 {
            return true;
        }
        if self.density_is_percent {
            area > 0
                && occupied.saturating_mul(100) >= u64::from(self.density).saturating_mul(area)
        } else {
            occupied >= u64::from(self.density)
        }
    }
}

/// Half-open cell rectangle `[min_x, max_x) × [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Inclusive left column.
    pub min_x: i64,
    /// Exclusive right column.
    pub max_x: i64,
    /// Inclusive top row.
    pub min_y: i64,
    /// Exclusive bottom row.
    pub max_y: i64,
}

impl Rect {
    /// Whether `c` lies inside.
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.min_x && c.x < self.max_x && c.y >= self.min_y && c.y < self.max_y
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        let w = self.max_x.saturating_sub(self.min_x).max(0) as u64;
        let h = self.max_y.saturating_sub(self.min_y).max(0) as u64;
        w.saturating_mul(h)
    }
}

/// Current playable region. Minimums are inclusive, maximums exclusive; an
/// absent edge is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Leftmost playable column.
    pub min_x: Option<i64>,
    /// One past the rightmost playable column.
    pub max_x: Option<i64>,
    /// Topmost playable row.
    pub min_y: Option<i64>,
    /// One past the bottom playable row.
    pub max_y: Option<i64>,
}

impl Bounds {
    /// No edges.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `[0, width) × [0, height)`.
    pub fn sized(width: i64, height: i64) -> Self {
        Self {
            min_x: Some(0),
            max_x: Some(width),
            min_y: Some(0),
            max_y: Some(height),
        }
    }

    /// Whether `(x, y)` is playable.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.contains_column(x)
            && self.min_y.is_none_or(|min| y >= min)
            && self.max_y.is_none_or(|max| y < max)
    }

    /// Whether column `x` is playable.
    pub fn contains_column(&self, x: i64) -> bool {
        self.min_x.is_none_or(|min| x >= min) && self.max_x.is_none_or(|max| x < max)
    }

    /// The bounds as a rectangle, when all four edges are set.
    pub fn rect(&self) -> Option<Rect> {
        Some(Rect {
            min_x: self.min_x?,
            max_x: self.max_x?,
            min_y: self.min_y?,
            max_y: self.max_y?,
        })
    }

    /// Pushes out every edge the placement at `at` is close enough to.
    ///
    /// `row_factor` scales vertical margins and growth (two stored rows per
    /// visual row on triangle grids). `vertical` is false for gravity boards,
    /// which keep a fixed floor and ceiling. `occupied` counts pieces inside a
    /// rectangle. Edges saturate at the limits of the coordinate space.
    ///
    /// On triangle grids the top and bottom bands are `margin * row_factor`
    /// stored rows deep, so both the trigger band and the growth are doubled.
    pub(crate) fn expand(
        &mut self,
        at: Coord,
        policy: &ExpansionPolicy,
        row_factor: i64,
        vertical: bool,
        occupied: impl Fn(&Rect) -> u64,
    ) {
        if !policy.is_enabled() {
            return;
        }
        let Some(rect) = self.rect() else {
            return;
        };
        let m = i64::from(policy.margin);
        let mv = m * row_factor;

        let left = Rect {
            max_x: rect.min_x.saturating_add(m).min(rect.max_x),
            ..rect
        };
        let right = Rect {
            min_x: rect.max_x.saturating_sub(m).max(rect.min_x),
            ..rect
        };
        let top = Rect {
            max_y: rect.min_y.saturating_add(mv).min(rect.max_y),
            ..rect
        };
        let bottom = Rect {
            min_y: rect.max_y.saturating_sub(mv).max(rect.min_y),
            ..rect
        };

        let grows = |band: &Rect| band.contains(at) && policy.admits(occupied(band), band.area());
        let grow_left = grows(&left);
        let grow_right = grows(&right);
        let grow_top = vertical && grows(&top);
        let grow_bottom = vertical && grows(&bottom);

        if grow_left {
            self.min_x = Some(at.x.saturating_sub(m));
        }
        if grow_right {
            self.max_x = Some(at.x.saturating_add(m + 1));
        }
        if grow_top {
            self.min_y = Some(at.y.saturating_sub(mv));
        }
        if grow_bottom {
            self.max_y = Some(at.y.saturating_add((m + 1) * row_factor));
        }
        if grow_left || grow_right || grow_top || grow_bottom {
            debug!(?at, bounds = ?self, "Board expanded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_saturates_at_coordinate_limits() {
        let mut bounds = Bounds {
            min_x: Some(i64::MAX - 4),
            max_x: Some(i64::MAX),
            min_y: Some(i64::MIN),
            max_y: Some(i64::MIN + 4),
        };
        let policy = ExpansionPolicy {
            margin: 3,
            ..ExpansionPolicy::default()
        };
        bounds.expand(Coord::new(i64::MAX - 1, i64::MIN + 1), &policy, 2, true, |_| 0);
        assert_eq!(bounds.max_x, Some(i64::MAX));
        assert_eq!(bounds.min_y, Some(i64::MIN));
        assert_eq!(bounds.min_x, Some(i64::MAX - 4));
        assert_eq!(bounds.max_y, Some(i64::MIN + 9));
    }

    #[test]
    fn test_area_of_widest_rect_saturates() {
        let rect = Rect {
            min_x: i64::MIN,
            max_x: i64::MAX,
            min_y: 0,
            max_y: 2,
        };
        assert_eq!(rect.area(), i64::MAX as u64 * 2);
    }
}
