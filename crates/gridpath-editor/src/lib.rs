//! Editing front end for the gridpath engine.
//!
//! [`Editor`] holds the mutable layout a user builds by clicking cells:
//! one source, one target and any number of obstacles. [`Board`] turns a
//! layout plus a stream of search [`Step`](gridpath_paths::Step)s into the
//! per-cell classes a renderer draws.

pub mod board;
pub mod config;
pub mod editor;
pub mod error;
pub mod mapgen;

pub use board::{Board, CellClass};
pub use config::{EditorConfig, ObstacleDensity};
pub use editor::{Editor, Mode};
pub use error::EditorError;
