//! A* against an independent BFS oracle on random grids.

use std::collections::HashMap;

use gridpath_core::{Cell, Grid};
use gridpath_paths::{SearchResult, Step, bfs_map, search};
use proptest::prelude::*;

/// A random grid plus endpoints, with the endpoints cleared of obstacles.
fn arb_case() -> impl Strategy<Value = (Grid, Cell, Cell)> {
    (1i32..10, 1i32..10)
        .prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            (
                Just(w),
                Just(h),
                proptest::collection::vec(proptest::bool::weighted(0.3), n),
                0..n,
                0..n,
            )
        })
        .prop_map(|(w, h, blocked, s, t)| {
            let obstacles = blocked
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b)
                .map(|(i, _)| Cell(i));
            let mut grid = Grid::with_obstacles(w, h, obstacles).unwrap();
            grid.clear_endpoints(Cell(s), Cell(t));
            (grid, Cell(s), Cell(t))
        })
}

fn settled(trace: &[Step]) -> Vec<Cell> {
    trace
        .iter()
        .filter_map(|s| match s {
            Step::Settled(c) => Some(*c),
            Step::Expanded(_) => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn path_is_shortest((grid, source, target) in arb_case()) {
        let oracle = bfs_map(&grid, &[source], u32::MAX);
        let result = search(&grid, source, target).unwrap().run();
        match (result.path(), oracle.at(target)) {
            (Some(path), Some(d)) => {
                prop_assert_eq!(path.len(), d as usize + 1);
            }
            (None, None) => {}
            (path, d) => {
                prop_assert!(false, "search gave {:?}, bfs gave {:?}", path, d);
            }
        }
    }

    #[test]
    fn path_is_valid((grid, source, target) in arb_case()) {
        let result = search(&grid, source, target).unwrap().run();
        if let Some(path) = result.path() {
            prop_assert_eq!(path.first(), Some(&source));
            prop_assert_eq!(path.last(), Some(&target));
            for c in path {
                prop_assert!(!grid.is_blocked(*c));
            }
            for w in path.windows(2) {
                let (a, b) = (grid.point(w[0]), grid.point(w[1]));
                prop_assert_eq!((a.x - b.x).abs() + (a.y - b.y).abs(), 1);
            }
        }
    }

    #[test]
    fn search_is_deterministic((grid, source, target) in arb_case()) {
        let a = search(&grid, source, target).unwrap().run();
        let b = search(&grid, source, target).unwrap().run();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn events_stay_inside_the_reachable_region((grid, source, target) in arb_case()) {
        let oracle = bfs_map(&grid, &[source], u32::MAX);
        let result = search(&grid, source, target).unwrap().run();
        for step in result.trace() {
            prop_assert!(oracle.is_reachable(step.cell()));
            prop_assert_ne!(step.cell(), source);
        }
    }

    #[test]
    fn exhausted_search_settles_reachable_cells_once((grid, source, target) in arb_case()) {
        let oracle = bfs_map(&grid, &[source], u32::MAX);
        let result = search(&grid, source, target).unwrap().run();
        if let SearchResult::NotFound { trace } = &result {
            let mut counts: HashMap<Cell, usize> = HashMap::new();
            for c in settled(trace) {
                *counts.entry(c).or_default() += 1;
            }
            prop_assert!(counts.values().all(|&n| n == 1));
            let mut seen: Vec<Cell> = counts.into_keys().collect();
            seen.sort();
            let mut expected: Vec<Cell> = oracle
                .reachable()
                .iter()
                .copied()
                .filter(|&c| c != source)
                .collect();
            expected.sort();
            prop_assert_eq!(seen, expected);
        }
    }

    #[test]
    fn every_settle_follows_its_expansion((grid, source, target) in arb_case()) {
        let result = search(&grid, source, target).unwrap().run();
        let trace = result.trace();
        for pair in trace.chunks(2) {
            match pair {
                [Step::Expanded(a), Step::Settled(b)] => {
                    prop_assert_eq!(a, b);
                }
                [Step::Expanded(a)] => {
                    prop_assert!(result.is_found());
                    prop_assert_eq!(*a, target);
                }
                other => {
                    prop_assert!(false, "unexpected step pair {:?}", other);
                }
            }
        }
    }

    #[test]
    fn trivial_search_has_no_events((grid, source, _target) in arb_case()) {
        let result = search(&grid, source, source).unwrap().run();
        prop_assert_eq!(result, SearchResult::Found { path: vec![source], trace: vec![] });
    }
}
