//! Per-cell visual classification for renderers.

use gridpath_core::{Cell, Grid};
use gridpath_paths::Step;

use crate::editor::Editor;

/// How a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellClass {
    #[default]
    Free,
    Obstacle,
    Source,
    Target,
    Path,
    Visited,
    Current,
}

impl CellClass {
    /// Classes produced by a run rather than by editing.
    #[inline]
    pub fn is_simulation(self) -> bool {
        matches!(self, Self::Path | Self::Visited | Self::Current)
    }

    #[inline]
    fn is_endpoint(self) -> bool {
        matches!(self, Self::Source | Self::Target)
    }
}

/// Row-major grid of [`CellClass`] values, updated from search steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<CellClass>,
}

impl Board {
    /// Classify a grid with optional endpoints.
    pub fn new(grid: &Grid, source: Option<Cell>, target: Option<Cell>) -> Self {
        let mut cells: Vec<CellClass> = (0..grid.cell_count())
            .map(|i| {
                if grid.is_blocked(Cell(i)) {
                    CellClass::Obstacle
                } else {
                    CellClass::Free
                }
            })
            .collect();
        for (c, class) in [(source, CellClass::Source), (target, CellClass::Target)] {
            if let Some(slot) = c.and_then(|c| cells.get_mut(c.0)) {
                *slot = class;
            }
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            cells,
        }
    }

    pub fn from_editor(editor: &Editor) -> Self {
        Self::new(editor.grid(), editor.source(), editor.target())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Class of `cell`, or `None` when out of range.
    #[inline]
    pub fn class(&self, cell: Cell) -> Option<CellClass> {
        self.cells.get(cell.0).copied()
    }

    /// The classes of row `y`, left to right.
    pub fn row(&self, y: i32) -> &[CellClass] {
        if y < 0 || y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// Number of cells with the given class.
    pub fn count(&self, class: CellClass) -> usize {
        self.cells.iter().filter(|&&c| c == class).count()
    }

    fn paint(&mut self, cell: Cell, class: CellClass) {
        if let Some(slot) = self.cells.get_mut(cell.0) {
            if !slot.is_endpoint() {
                *slot = class;
            }
        }
    }

    /// Record a search step: expanded cells become current, settled cells
    /// become visited. Endpoints keep their class.
    pub fn apply(&mut self, step: Step) {
        match step {
            Step::Expanded(c) => self.paint(c, CellClass::Current),
            Step::Settled(c) => self.paint(c, CellClass::Visited),
        }
    }

    /// Overlay a found path. The endpoints keep their class.
    pub fn apply_path(&mut self, path: &[Cell]) {
        for &c in path {
            self.paint(c, CellClass::Path);
        }
    }

    /// Reset every run-produced class to [`CellClass::Free`].
    pub fn clear_simulation(&mut self) {
        for slot in &mut self.cells {
            if slot.is_simulation() {
                *slot = CellClass::Free;
            }
        }
    }
}
