use gridpath_core::Cell;

/// Rebuild the path ending at `target` from a predecessor lookup.
///
/// Starting at `target`, follows `came_from` until a cell without a
/// predecessor (the source) is reached. The result is in source-to-target
/// order, includes both endpoints, and is never empty. The predecessor chain
/// must be acyclic, which holds for any map built by a best-first search.
pub fn reconstruct(came_from: impl Fn(Cell) -> Option<Cell>, target: Cell) -> Vec<Cell> {
    let mut path = vec![target];
    let mut cur = target;
    while let Some(prev) = came_from(cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}
