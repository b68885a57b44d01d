//! Random obstacle layouts.

use gridpath_core::{Cell, Grid};
use gridpath_paths::bfs_map;
use rand::{Rng, RngExt};

use crate::config::ObstacleDensity;

/// Replace every obstacle in `grid` with a fresh random scatter.
///
/// Draws a count in the density bounds, then that many uniform cell ids.
/// Ids listed in `keep` are never blocked. Returns the number of obstacle
/// cells in the result.
pub fn scatter_obstacles(
    grid: &mut Grid,
    rng: &mut impl Rng,
    density: ObstacleDensity,
    keep: &[Cell],
) -> usize {
    let cells = grid.cell_count();
    grid.clear_obstacles();

    let (lo, hi) = density.bounds(cells);
    let draws = if hi > lo { rng.random_range(lo..hi) } else { lo };

    for _ in 0..draws {
        let c = Cell(rng.random_range(0..cells));
        if keep.contains(&c) {
            continue;
        }
        grid.block(c);
    }

    let placed = grid.obstacle_count();
    log::debug!("scattered {placed} obstacles from {draws} draws over {cells} cells");
    placed
}

/// Scatter obstacles until `target` is reachable from `source`, trying at
/// most `attempts` layouts.
///
/// Returns `true` on success. On failure the last layout tried is left in
/// place.
pub fn scatter_solvable(
    grid: &mut Grid,
    rng: &mut impl Rng,
    density: ObstacleDensity,
    source: Cell,
    target: Cell,
    attempts: usize,
) -> bool {
    for attempt in 1..=attempts {
        scatter_obstacles(grid, rng, density, &[source, target]);
        if bfs_map(&*grid, &[source], u32::MAX).is_reachable(target) {
            log::debug!("solvable layout found on attempt {attempt}");
            return true;
        }
    }
    log::warn!("no solvable layout after {attempts} attempts");
    false
}

/// Pick a uniformly random free cell not listed in `exclude`.
pub fn random_free_cell(grid: &Grid, rng: &mut impl Rng, exclude: &[Cell]) -> Option<Cell> {
    let free: Vec<Cell> = (0..grid.cell_count())
        .map(Cell)
        .filter(|c| !grid.is_blocked(*c) && !exclude.contains(c))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scatter_respects_density_and_keep() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(40, 30).unwrap();
        let keep = [Cell(0), Cell(1199)];
        let placed = scatter_obstacles(&mut grid, &mut rng, ObstacleDensity::default(), &keep);
        assert_eq!(placed, grid.obstacle_count());
        // Duplicates collapse, so the count can only fall below the upper bound.
        assert!(placed > 0);
        assert!(placed < 600);
        assert!(!grid.is_blocked(Cell(0)));
        assert!(!grid.is_blocked(Cell(1199)));
    }

    #[test]
    fn scatter_replaces_previous_obstacles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::with_obstacles(4, 4, (0..16).map(Cell)).unwrap();
        let placed = scatter_obstacles(&mut grid, &mut rng, ObstacleDensity::new(0.0, 0.0), &[]);
        assert_eq!(placed, 0);
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn scatter_is_reproducible_with_a_seed() {
        let mut a = Grid::new(10, 10).unwrap();
        let mut b = Grid::new(10, 10).unwrap();
        let d = ObstacleDensity::default();
        scatter_obstacles(&mut a, &mut StdRng::seed_from_u64(42), d, &[]);
        scatter_obstacles(&mut b, &mut StdRng::seed_from_u64(42), d, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn solvable_layout_connects_endpoints() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(12, 12).unwrap();
        let (s, t) = (Cell(0), Cell(143));
        let ok = scatter_solvable(&mut grid, &mut rng, ObstacleDensity::new(0.2, 0.3), s, t, 200);
        assert!(ok);
        assert!(bfs_map(&grid, &[s], u32::MAX).is_reachable(t));
    }

    #[test]
    fn solvable_with_no_attempts_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(3, 3).unwrap();
        let d = ObstacleDensity::default();
        assert!(!scatter_solvable(&mut grid, &mut rng, d, Cell(0), Cell(8), 0));
    }

    #[test]
    fn random_free_cell_skips_blocked_and_excluded() {
        let mut rng = StdRng::seed_from_u64(9);
        let grid = Grid::with_obstacles(2, 2, [Cell(0), Cell(1)]).unwrap();
        for _ in 0..20 {
            let c = random_free_cell(&grid, &mut rng, &[Cell(2)]);
            assert_eq!(c, Some(Cell(3)));
        }
        assert_eq!(random_free_cell(&grid, &mut rng, &[Cell(2), Cell(3)]), None);
    }
}
