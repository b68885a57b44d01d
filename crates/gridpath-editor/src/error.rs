use std::fmt;

use gridpath_core::{Cell, GridError};

/// Errors raised by editor operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A run was requested before a source was chosen.
    MissingSource,
    /// A run was requested before a target was chosen.
    MissingTarget,
    /// Source and target would be the same cell.
    SameEndpoints(Cell),
    /// The operation is not allowed while a run is in progress.
    Simulating,
    /// The editor dimensions are invalid.
    Grid(GridError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => f.write_str("no source selected"),
            Self::MissingTarget => f.write_str("no target selected"),
            Self::SameEndpoints(c) => write!(f, "source and target are both {c}"),
            Self::Simulating => f.write_str("a simulation is already running"),
            Self::Grid(e) => write!(f, "editor grid: {e}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for EditorError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn grid_errors_are_chained() {
        let e = EditorError::from(GridError::InvalidDimensions {
            width: 0,
            height: 3,
        });
        assert!(e.source().is_some());
        assert!(EditorError::MissingTarget.source().is_none());
    }
}
