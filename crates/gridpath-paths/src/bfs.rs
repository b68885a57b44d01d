use std::collections::VecDeque;

use gridpath_core::Cell;

use crate::traits::Pather;

/// Unit-cost distances from a set of source cells, as computed by
/// [`bfs_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    dist: Vec<Option<u32>>,
    order: Vec<Cell>,
}

impl DistanceMap {
    /// Distance from the nearest source, or `None` if `cell` was not reached.
    #[inline]
    pub fn at(&self, cell: Cell) -> Option<u32> {
        self.dist.get(cell.0).copied().flatten()
    }

    /// Whether `cell` was reached.
    #[inline]
    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.at(cell).is_some()
    }

    /// Reached cells in visiting order, sources first.
    #[inline]
    pub fn reachable(&self) -> &[Cell] {
        &self.order
    }
}

/// Compute a multi-source breadth-first search distance map.
///
/// Each step has cost 1. Expansion stops when the distance exceeds
/// `max_dist`. Out-of-range and blocked sources are skipped.
pub fn bfs_map<P: Pather>(pather: &P, sources: &[Cell], max_dist: u32) -> DistanceMap {
    let len = pather.cell_count();
    let mut dist = vec![None; len];
    let mut order = Vec::new();
    let mut queue: VecDeque<Cell> = VecDeque::new();

    for &src in sources {
        if src.0 >= len || pather.is_blocked(src) || dist[src.0].is_some() {
            continue;
        }
        dist[src.0] = Some(0);
        queue.push_back(src);
        order.push(src);
    }

    let mut nbuf = Vec::with_capacity(4);

    while let Some(c) = queue.pop_front() {
        let Some(current_dist) = dist[c.0] else {
            continue;
        };
        let nd = current_dist + 1;
        if nd > max_dist {
            continue;
        }

        nbuf.clear();
        pather.neighbors(c, &mut nbuf);

        for &n in nbuf.iter() {
            if n.0 >= len || pather.is_blocked(n) || dist[n.0].is_some() {
                continue;
            }
            dist[n.0] = Some(nd);
            queue.push_back(n);
            order.push(n);
        }
    }

    DistanceMap { dist, order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::Grid;

    #[test]
    fn distances_on_open_grid() {
        let g = Grid::new(3, 3).unwrap();
        let m = bfs_map(&g, &[Cell(0)], u32::MAX);
        assert_eq!(m.at(Cell(0)), Some(0));
        assert_eq!(m.at(Cell(4)), Some(2));
        assert_eq!(m.at(Cell(8)), Some(4));
        assert_eq!(m.reachable().len(), 9);
        assert_eq!(m.reachable()[0], Cell(0));
    }

    #[test]
    fn walls_block_reachability() {
        let g = Grid::from_text(
            "
            .#.
            .#.
            .#.
            ",
        )
        .unwrap();
        let m = bfs_map(&g, &[Cell(0)], u32::MAX);
        assert!(m.is_reachable(Cell(6)));
        assert!(!m.is_reachable(Cell(2)));
        assert!(!m.is_reachable(Cell(1)));
        assert_eq!(m.reachable().len(), 3);
    }

    #[test]
    fn max_dist_limits_expansion() {
        let g = Grid::new(5, 1).unwrap();
        let m = bfs_map(&g, &[Cell(0)], 2);
        assert_eq!(m.at(Cell(2)), Some(2));
        assert_eq!(m.at(Cell(3)), None);
    }

    #[test]
    fn multiple_sources_take_the_nearest() {
        let g = Grid::new(5, 1).unwrap();
        let m = bfs_map(&g, &[Cell(0), Cell(4)], u32::MAX);
        assert_eq!(m.at(Cell(1)), Some(1));
        assert_eq!(m.at(Cell(2)), Some(2));
        assert_eq!(m.at(Cell(3)), Some(1));
    }

    #[test]
    fn invalid_sources_are_skipped() {
        let g = Grid::with_obstacles(2, 2, [Cell(1)]).unwrap();
        let m = bfs_map(&g, &[Cell(1), Cell(7)], u32::MAX);
        assert!(m.reachable().is_empty());
        assert_eq!(m.at(Cell(99)), None);
    }
}
