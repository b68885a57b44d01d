//! Errors raised while building a [`Grid`](crate::Grid).

use std::fmt;

use crate::{Cell, Point};

/// Errors that can occur when constructing or editing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is not a positive integer.
    InvalidDimensions { width: i32, height: i32 },
    /// `width * height` does not fit in an `i32`, or the cell storage
    /// cannot be allocated.
    TooLarge { width: i32, height: i32 },
    /// A cell id is outside `[0, width * height)`.
    CellOutOfRange { cell: Cell, len: usize },
    /// Text layout rows have inconsistent widths.
    InconsistentRows { row: i32, expected: i32, found: i32 },
    /// Text layout contains a character other than `.` or `#`.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "grid of {width}x{height} cells is too large")
            }
            Self::CellOutOfRange { cell, len } => {
                write!(f, "cell {cell} out of range for a grid of {len} cells")
            }
            Self::InconsistentRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid layout contains invalid character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
