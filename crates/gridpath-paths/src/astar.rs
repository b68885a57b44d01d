//! A* search as a lazy sequence of step events.
//!
//! [`Search`] owns all per-run state and advances one step per call to
//! [`Iterator::next`]. A caller that only wants the answer drains it with
//! [`Search::run`] or [`Search::into_outcome`]; a visualizer consumes the
//! [`Step`] events at its own pace and may drop the search at any step
//! boundary.

use std::iter::FusedIterator;

use gridpath_core::{Cell, Grid};

use crate::error::{Endpoint, InvalidInput};
use crate::reconstruct::reconstruct;
use crate::state::SearchState;
use crate::traits::AstarPather;

/// A single search step, tagging the cell it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// The cell was selected from the open set and is being processed.
    Expanded(Cell),
    /// All neighbors of the cell have been relaxed.
    Settled(Cell),
}

impl Step {
    /// The cell this step refers to.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Self::Expanded(c) | Self::Settled(c) => c,
        }
    }
}

/// Terminal result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A shortest path, source first and target last.
    Found(Vec<Cell>),
    /// The open set emptied before the target was reached.
    NotFound,
}

impl Outcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Consume the outcome, returning the path if one was found.
    pub fn into_path(self) -> Option<Vec<Cell>> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// A fully drained search: the outcome together with its complete trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult {
    Found { path: Vec<Cell>, trace: Vec<Step> },
    NotFound { trace: Vec<Step> },
}

impl SearchResult {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::NotFound { .. } => None,
        }
    }

    /// Every step event, in emission order.
    pub fn trace(&self) -> &[Step] {
        match self {
            Self::Found { trace, .. } | Self::NotFound { trace } => trace,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Pop the next cell from the open set.
    Select,
    /// Relax the neighbors of the cell popped last.
    Relax(Cell),
    Done,
}

/// A running A* search over a [`Pather`](crate::Pather) (a [`Grid`] by default).
///
/// Ties between open cells of equal `f` are broken by the lowest cell id, and
/// neighbors are relaxed in the pather's order, so two searches over the same
/// input produce identical traces and paths.
///
/// The source never appears in the trace. Every other cell taken from the
/// open set yields [`Step::Expanded`], followed by [`Step::Settled`] once its
/// neighbors are relaxed; the target yields only `Expanded`, after which the
/// search is finished.
pub struct Search<'a, P: AstarPather = Grid> {
    pather: &'a P,
    source: Cell,
    target: Cell,
    state: SearchState,
    phase: Phase,
    outcome: Option<Outcome>,
    steps: usize,
    nbuf: Vec<Cell>,
}

/// Start an A* search on `grid` from `source` to `target`.
///
/// Fails with [`InvalidInput`] if either endpoint is out of range or blocked;
/// no search state is created in that case.
pub fn search(grid: &Grid, source: Cell, target: Cell) -> Result<Search<'_>, InvalidInput> {
    Search::new(grid, source, target)
}

/// Run a search to completion and return only the path.
pub fn find_path(
    grid: &Grid,
    source: Cell,
    target: Cell,
) -> Result<Option<Vec<Cell>>, InvalidInput> {
    Ok(search(grid, source, target)?.into_outcome().into_path())
}

impl<'a, P: AstarPather> Search<'a, P> {
    /// Validate the endpoints and set up a fresh search state.
    pub fn new(pather: &'a P, source: Cell, target: Cell) -> Result<Self, InvalidInput> {
        check_endpoint(pather, Endpoint::Source, source)?;
        check_endpoint(pather, Endpoint::Target, target)?;

        let mut search = Self {
            pather,
            source,
            target,
            state: SearchState::new(pather.cell_count()),
            phase: Phase::Select,
            outcome: None,
            steps: 0,
            nbuf: Vec::with_capacity(4),
        };

        log::debug!("search started: {source} -> {target}");
        if source == target {
            search.complete(Outcome::Found(vec![source]));
        } else {
            let h = pather.estimate(source, target);
            search.state.discover(source, 0, h, None);
        }
        Ok(search)
    }

    /// The cell the search starts from.
    #[inline]
    pub fn source(&self) -> Cell {
        self.source
    }

    /// The cell the search is looking for.
    #[inline]
    pub fn target(&self) -> Cell {
        self.target
    }

    /// The terminal outcome, once the search has finished.
    #[inline]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether the search has finished; further calls to `next` yield `None`.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Number of step events emitted so far.
    #[inline]
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Whether `cell` is currently in the open set.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.state.is_open(cell)
    }

    /// Open cells in increasing id order.
    pub fn frontier(&self) -> impl Iterator<Item = Cell> + '_ {
        self.state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.open)
            .map(|(i, _)| Cell(i))
    }

    /// Number of cells in the open set.
    pub fn frontier_len(&self) -> usize {
        self.state.open_len()
    }

    /// Best known cost from the source, or `None` if `cell` is undiscovered.
    pub fn g_score(&self, cell: Cell) -> Option<u32> {
        self.state.g(cell)
    }

    /// `g_score + estimate`, or `None` if `cell` is undiscovered.
    pub fn f_score(&self, cell: Cell) -> Option<u32> {
        self.state.f(cell)
    }

    /// Predecessor of `cell` on its best known path. `None` for the source
    /// and for undiscovered cells.
    pub fn came_from(&self, cell: Cell) -> Option<Cell> {
        self.state.parent(cell)
    }

    /// Drain the remaining steps and return the outcome with the steps that
    /// were still pending. Steps already taken by the caller are not repeated.
    pub fn run(mut self) -> SearchResult {
        let trace: Vec<Step> = self.by_ref().collect();
        match self.outcome {
            Some(Outcome::Found(path)) => SearchResult::Found { path, trace },
            _ => SearchResult::NotFound { trace },
        }
    }

    /// Drain the remaining steps and return only the outcome.
    pub fn into_outcome(mut self) -> Outcome {
        self.by_ref().for_each(drop);
        self.outcome.unwrap_or(Outcome::NotFound)
    }

    fn complete(&mut self, outcome: Outcome) {
        match &outcome {
            Outcome::Found(path) => log::debug!(
                "search finished: path of {} cells after {} steps",
                path.len(),
                self.steps
            ),
            Outcome::NotFound => {
                log::debug!("search finished: no path after {} steps", self.steps)
            }
        }
        self.outcome = Some(outcome);
        self.phase = Phase::Done;
    }

    fn relax(&mut self, current: Cell) {
        let Some(current_g) = self.state.g(current) else {
            return;
        };
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(current, &mut nbuf);

        for &n in nbuf.iter() {
            if n.0 >= self.state.nodes.len() || self.pather.is_blocked(n) {
                continue;
            }
            let tentative_g = current_g + self.pather.cost(current, n);
            if self.state.g(n).is_some_and(|g| tentative_g >= g) {
                continue;
            }
            let f = tentative_g + self.pather.estimate(n, self.target);
            self.state.discover(n, tentative_g, f, Some(current));
        }

        self.nbuf = nbuf;
    }

    fn emit(&mut self, step: Step) -> Option<Step> {
        self.steps += 1;
        log::trace!("{step:?}");
        Some(step)
    }
}

fn check_endpoint<P: AstarPather>(
    pather: &P,
    endpoint: Endpoint,
    cell: Cell,
) -> Result<(), InvalidInput> {
    let len = pather.cell_count();
    if cell.0 >= len {
        return Err(InvalidInput::OutOfRange {
            endpoint,
            cell,
            len,
        });
    }
    if pather.is_blocked(cell) {
        return Err(InvalidInput::Blocked { endpoint, cell });
    }
    Ok(())
}

impl<P: AstarPather> Iterator for Search<'_, P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Relax(current) => {
                    self.relax(current);
                    self.phase = Phase::Select;
                    if current != self.source {
                        return self.emit(Step::Settled(current));
                    }
                }
                Phase::Select => {
                    let Some(current) = self.state.pop_min() else {
                        self.complete(Outcome::NotFound);
                        return None;
                    };
                    if current == self.target {
                        let state = &self.state;
                        let path = reconstruct(|c| state.parent(c), current);
                        self.complete(Outcome::Found(path));
                    } else {
                        self.phase = Phase::Relax(current);
                    }
                    if current != self.source {
                        return self.emit(Step::Expanded(current));
                    }
                }
            }
        }
    }
}

impl<P: AstarPather> FusedIterator for Search<'_, P> {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_wire_form() {
        let json = serde_json::to_string(&Step::Expanded(Cell(3))).unwrap();
        assert_eq!(json, r#"{"Expanded":3}"#);
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Step::Expanded(Cell(3)));
    }

    #[test]
    fn search_result_round_trip() {
        let g = Grid::new(3, 1).unwrap();
        let result = search(&g, Cell(0), Cell(2)).unwrap().run();
        let json = serde_json::to_string(&result).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
