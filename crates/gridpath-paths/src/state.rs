use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::Cell;

// ---------------------------------------------------------------------------
// Per-cell bookkeeping
// ---------------------------------------------------------------------------

/// Sentinel cost meaning "never discovered".
pub(crate) const UNREACHABLE: u32 = u32::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: u32,
    pub(crate) f: u32,
    pub(crate) parent: Option<Cell>,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: None,
            open: false,
        }
    }
}

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `f` first and, among equal `f`, the lowest cell id.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) cell: Cell,
    pub(crate) f: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Cost maps, predecessor map and open set of a single search run.
///
/// The open set is a heap with lazy deletion: lowering a cell's `f` pushes a
/// fresh entry and leaves the old one behind. An entry is live only while its
/// cell is open and its `f` still matches the node, so a cell is never
/// selected twice for the same open stint. `f` only ever decreases for a given
/// cell, which keeps live entries unique.
pub(crate) struct SearchState {
    pub(crate) nodes: Vec<Node>,
    heap: BinaryHeap<NodeRef>,
    open_len: usize,
}

impl SearchState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::default(); len],
            heap: BinaryHeap::new(),
            open_len: 0,
        }
    }

    /// Record a better path to `cell` and make sure it is open.
    pub(crate) fn discover(&mut self, cell: Cell, g: u32, f: u32, parent: Option<Cell>) {
        let n = &mut self.nodes[cell.0];
        n.g = g;
        n.f = f;
        n.parent = parent;
        if !n.open {
            n.open = true;
            self.open_len += 1;
        }
        self.heap.push(NodeRef { cell, f });
    }

    /// Remove and return the open cell with the smallest `f`, lowest id first.
    pub(crate) fn pop_min(&mut self) -> Option<Cell> {
        while let Some(entry) = self.heap.pop() {
            let n = &mut self.nodes[entry.cell.0];
            // Skip stale entries.
            if !n.open || n.f != entry.f {
                continue;
            }
            n.open = false;
            self.open_len -= 1;
            return Some(entry.cell);
        }
        None
    }

    #[inline]
    pub(crate) fn g(&self, cell: Cell) -> Option<u32> {
        self.nodes
            .get(cell.0)
            .map(|n| n.g)
            .filter(|&g| g != UNREACHABLE)
    }

    #[inline]
    pub(crate) fn f(&self, cell: Cell) -> Option<u32> {
        self.nodes
            .get(cell.0)
            .map(|n| n.f)
            .filter(|&f| f != UNREACHABLE)
    }

    #[inline]
    pub(crate) fn parent(&self, cell: Cell) -> Option<Cell> {
        self.nodes.get(cell.0).and_then(|n| n.parent)
    }

    #[inline]
    pub(crate) fn is_open(&self, cell: Cell) -> bool {
        self.nodes.get(cell.0).is_some_and(|n| n.open)
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_then_lowest_id() {
        let mut s = SearchState::new(10);
        s.discover(Cell(7), 1, 4, None);
        s.discover(Cell(3), 1, 4, None);
        s.discover(Cell(9), 1, 2, None);
        s.discover(Cell(5), 1, 4, None);
        assert_eq!(s.open_len(), 4);
        assert_eq!(s.pop_min(), Some(Cell(9)));
        assert_eq!(s.pop_min(), Some(Cell(3)));
        assert_eq!(s.pop_min(), Some(Cell(5)));
        assert_eq!(s.pop_min(), Some(Cell(7)));
        assert_eq!(s.pop_min(), None);
        assert_eq!(s.open_len(), 0);
    }

    #[test]
    fn rediscovery_does_not_duplicate() {
        let mut s = SearchState::new(4);
        s.discover(Cell(2), 5, 9, Some(Cell(0)));
        s.discover(Cell(2), 3, 7, Some(Cell(1)));
        assert_eq!(s.open_len(), 1);
        assert_eq!(s.g(Cell(2)), Some(3));
        assert_eq!(s.f(Cell(2)), Some(7));
        assert_eq!(s.parent(Cell(2)), Some(Cell(1)));
        assert_eq!(s.pop_min(), Some(Cell(2)));
        // The stale f=9 entry is skipped.
        assert_eq!(s.pop_min(), None);
        assert!(!s.is_open(Cell(2)));
    }

    #[test]
    fn undiscovered_cells_have_no_scores() {
        let s = SearchState::new(4);
        assert_eq!(s.g(Cell(1)), None);
        assert_eq!(s.f(Cell(1)), None);
        assert_eq!(s.parent(Cell(1)), None);
        assert_eq!(s.g(Cell(40)), None);
        assert!(!s.is_open(Cell(40)));
    }
}
