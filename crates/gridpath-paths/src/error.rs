use std::fmt;

use gridpath_core::Cell;

/// Which end of the search an [`InvalidInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A search precondition was violated. Reported before any step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// The endpoint id is not in `[0, len)`.
    OutOfRange {
        endpoint: Endpoint,
        cell: Cell,
        len: usize,
    },
    /// The endpoint sits on an obstacle.
    Blocked { endpoint: Endpoint, cell: Cell },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                endpoint,
                cell,
                len,
            } => write!(
                f,
                "{endpoint} {cell} is out of range for a grid of {len} cells"
            ),
            Self::Blocked { endpoint, cell } => {
                write!(f, "{endpoint} {cell} is an obstacle")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
