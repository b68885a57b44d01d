//! **gridpath-core**: grid model for the gridpath search engine.
//!
//! This crate provides the types every other gridpath crate builds on:
//! geometry primitives, flat [`Cell`] ids, and the obstacle [`Grid`] that
//! answers bounds and adjacency queries during a search.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::Grid;
