use gridpath_core::{Cell, Grid};

use crate::distance::manhattan;

/// Minimal pathfinding interface: the cell space plus neighbor enumeration.
pub trait Pather {
    /// Number of cells; valid ids are `0..cell_count()`.
    fn cell_count(&self) -> usize;

    /// Whether `c` can be neither entered nor left.
    fn is_blocked(&self, c: Cell) -> bool;

    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    ///
    /// The append order is the order in which a search relaxes them, so it
    /// must be deterministic.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> u32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, to: Cell) -> u32;
}

impl Pather for Grid {
    fn cell_count(&self) -> usize {
        Grid::cell_count(self)
    }

    fn is_blocked(&self, c: Cell) -> bool {
        Grid::is_blocked(self, c)
    }

    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend(Grid::neighbors(self, c));
    }
}

/// Every move on a [`Grid`] costs one unit.
impl WeightedPather for Grid {
    fn cost(&self, _from: Cell, _to: Cell) -> u32 {
        1
    }
}

/// Manhattan distance: admissible and consistent for unit-cost 4-way moves.
impl AstarPather for Grid {
    fn estimate(&self, from: Cell, to: Cell) -> u32 {
        manhattan(self.point(from), self.point(to)).unsigned_abs()
    }
}
