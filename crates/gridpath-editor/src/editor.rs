//! Interactive editor state: endpoint and obstacle selection.
//!
//! The editor is the mutable side of the system. A run copies its state into
//! a fresh [`Grid`] with [`Editor::begin_run`], so nothing the search reads
//! can change until [`Editor::finish_run`] hands control back.

use gridpath_core::{Cell, Grid, GridError};
use rand::Rng;

use crate::config::{EditorConfig, ObstacleDensity};
use crate::error::EditorError;
use crate::mapgen;

/// What a click on a cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    ChooseSource,
    ChooseTarget,
    ChooseObstacles,
    /// A run is in progress; clicks are ignored.
    Simulating,
}

/// Editor state: obstacle layout, optional endpoints and the current mode.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    source: Option<Cell>,
    target: Option<Cell>,
    mode: Mode,
    resume: Mode,
    density: ObstacleDensity,
}

impl Editor {
    /// Create an empty editor with no obstacles and no endpoints.
    pub fn new(config: &EditorConfig) -> Result<Self, EditorError> {
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            grid,
            source: None,
            target: None,
            mode: Mode::default(),
            resume: Mode::default(),
            density: config.density,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn source(&self) -> Option<Cell> {
        self.source
    }

    #[inline]
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn density(&self) -> ObstacleDensity {
        self.density
    }

    #[inline]
    pub fn is_simulating(&self) -> bool {
        self.mode == Mode::Simulating
    }

    /// Both endpoints are chosen and no run is in progress.
    pub fn can_simulate(&self) -> bool {
        self.source.is_some() && self.target.is_some() && !self.is_simulating()
    }

    /// Switch the click mode.
    ///
    /// Switching to [`Mode::Simulating`] is the same as [`Editor::begin_run`]
    /// with the snapshot discarded.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        if mode == Mode::Simulating {
            return self.begin_run().map(|_| ());
        }
        self.mode = mode;
        Ok(())
    }

    /// Apply a click on `cell` according to the current mode.
    ///
    /// Returns whether the editor state changed. Out-of-range cells and
    /// clicks during a run are ignored.
    pub fn click(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) {
            return false;
        }
        match self.mode {
            Mode::ChooseSource => {
                Self::choose_endpoint(&mut self.grid, &mut self.source, self.target, cell)
            }
            Mode::ChooseTarget => {
                Self::choose_endpoint(&mut self.grid, &mut self.target, self.source, cell)
            }
            Mode::ChooseObstacles => {
                if self.is_endpoint(cell) {
                    return false;
                }
                let blocked = self.grid.is_blocked(cell);
                self.grid.set_blocked(cell, !blocked).is_ok()
            }
            Mode::Simulating => false,
        }
    }

    // Shared by source and target clicks. The clicked cell loses its
    // obstacle even when the click then toggles the endpoint off.
    fn choose_endpoint(
        grid: &mut Grid,
        endpoint: &mut Option<Cell>,
        other: Option<Cell>,
        cell: Cell,
    ) -> bool {
        if other == Some(cell) {
            return false;
        }
        let was_blocked = grid.is_blocked(cell);
        if was_blocked && grid.set_blocked(cell, false).is_err() {
            return false;
        }
        *endpoint = match *endpoint {
            Some(c) if c == cell => None,
            _ => Some(cell),
        };
        true
    }

    fn is_endpoint(&self, cell: Cell) -> bool {
        self.source == Some(cell) || self.target == Some(cell)
    }

    fn check_placement(&self, cell: Cell, other: Option<Cell>) -> Result<(), EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        if !self.grid.contains(cell) {
            return Err(GridError::CellOutOfRange {
                cell,
                len: self.grid.cell_count(),
            }
            .into());
        }
        if other == Some(cell) {
            return Err(EditorError::SameEndpoints(cell));
        }
        Ok(())
    }

    /// Place the source on `cell`, clearing any obstacle there.
    pub fn set_source(&mut self, cell: Cell) -> Result<(), EditorError> {
        self.check_placement(cell, self.target)?;
        self.grid.set_blocked(cell, false)?;
        self.source = Some(cell);
        Ok(())
    }

    /// Place the target on `cell`, clearing any obstacle there.
    pub fn set_target(&mut self, cell: Cell) -> Result<(), EditorError> {
        self.check_placement(cell, self.source)?;
        self.grid.set_blocked(cell, false)?;
        self.target = Some(cell);
        Ok(())
    }

    /// Remove every obstacle.
    pub fn clear_obstacles(&mut self) -> Result<(), EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        self.grid.clear_obstacles();
        Ok(())
    }

    fn endpoints(&self) -> Vec<Cell> {
        self.source.into_iter().chain(self.target).collect()
    }

    /// Replace the obstacles with a random scatter that avoids the endpoints.
    /// Returns the resulting obstacle count.
    pub fn randomize_obstacles(&mut self, rng: &mut impl Rng) -> Result<usize, EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        let keep = self.endpoints();
        Ok(mapgen::scatter_obstacles(
            &mut self.grid,
            rng,
            self.density,
            &keep,
        ))
    }

    /// Randomize until the target is reachable from the source, trying at
    /// most `attempts` layouts. Both endpoints must be chosen.
    pub fn randomize_solvable(
        &mut self,
        rng: &mut impl Rng,
        attempts: usize,
    ) -> Result<bool, EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        let source = self.source.ok_or(EditorError::MissingSource)?;
        let target = self.target.ok_or(EditorError::MissingTarget)?;
        Ok(mapgen::scatter_solvable(
            &mut self.grid,
            rng,
            self.density,
            source,
            target,
            attempts,
        ))
    }

    /// Copy the current layout into a fresh grid for a run.
    ///
    /// The copy has both endpoints cleared of obstacles.
    pub fn snapshot(&self) -> Result<(Grid, Cell, Cell), EditorError> {
        let source = self.source.ok_or(EditorError::MissingSource)?;
        let target = self.target.ok_or(EditorError::MissingTarget)?;
        let mut grid = self.grid.clone();
        grid.clear_endpoints(source, target);
        Ok((grid, source, target))
    }

    /// Enter [`Mode::Simulating`] and return the snapshot to search on.
    pub fn begin_run(&mut self) -> Result<(Grid, Cell, Cell), EditorError> {
        if self.is_simulating() {
            return Err(EditorError::Simulating);
        }
        let snapshot = self.snapshot()?;
        self.resume = self.mode;
        self.mode = Mode::Simulating;
        log::debug!("run started from {} to {}", snapshot.1, snapshot.2);
        Ok(snapshot)
    }

    /// Leave [`Mode::Simulating`], restoring the mode active before the run.
    /// Does nothing when no run is in progress.
    pub fn finish_run(&mut self) {
        if self.is_simulating() {
            self.mode = self.resume;
            log::debug!("run finished, back to {:?}", self.mode);
        }
    }
}
