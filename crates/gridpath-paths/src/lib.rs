//! Shortest-path search over 4-connected grids.
//!
//! - **A\*** search as a lazy step sequence ([`search`], [`Search`])
//! - **Path reconstruction** from a predecessor map ([`reconstruct`])
//! - **BFS** unit-cost distance maps ([`bfs_map`])
//!
//! A [`Search`] owns its state for exactly one run. It yields [`Step`] events
//! that a visualizer can render at its own pace, and finishes with an
//! [`Outcome`]. Searches only borrow the [`Grid`](gridpath_core::Grid), so any
//! number of them can run over the same grid.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`Grid`](gridpath_core::Grid) implements all three with unit costs and the
//! Manhattan heuristic.

mod astar;
mod bfs;
mod distance;
mod error;
mod reconstruct;
mod state;
mod traits;

pub use astar::{Outcome, Search, SearchResult, Step, find_path, search};
pub use bfs::{DistanceMap, bfs_map};
pub use distance::manhattan;
pub use error::{Endpoint, InvalidInput};
pub use reconstruct::reconstruct;
pub use traits::{AstarPather, Pather, WeightedPather};
