//! [`Cell`]: a flat, row-major grid cell id.

use std::fmt;

/// A grid cell identified by its row-major index `row * width + col`.
///
/// A `Cell` carries no dimensions of its own; converting it to a
/// [`Point`](crate::Point) or checking its range goes through a
/// [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cell(pub usize);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_the_flat_id() {
        assert_eq!(Cell(7).to_string(), "#7");
    }

    #[test]
    fn ordering_follows_index() {
        assert!(Cell(2) < Cell(10));
        let mut v = vec![Cell(5), Cell(1), Cell(3)];
        v.sort();
        assert_eq!(v, vec![Cell(1), Cell(3), Cell(5)]);
    }
}
