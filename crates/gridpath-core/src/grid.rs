//! The search grid: fixed dimensions plus a set of obstacle cells.
//!
//! A [`Grid`] is built once per run from editor state and only read while a
//! search is running. Cells are addressed by flat row-major [`Cell`] ids;
//! [`Grid::point`] and [`Grid::cell_at`] convert to and from 2D [`Point`]s.

use std::fmt;

use crate::{Cell, GridError, Point, Range};

/// Rectangular grid with obstacle membership.
///
/// Width and height are always positive: the constructors reject anything
/// else. Obstacles are stored as a dense bitmap indexed by cell id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create an obstacle-free grid.
    ///
    /// The cell count `width * height` must fit in an `i32`; larger grids
    /// and grids whose storage cannot be allocated are `TooLarge`.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let too_large = GridError::TooLarge { width, height };
        let len = width.checked_mul(height).ok_or_else(|| too_large.clone())? as usize;
        let mut blocked = Vec::new();
        blocked.try_reserve_exact(len).map_err(|_| too_large)?;
        blocked.resize(len, false);
        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    /// Create a grid with the given obstacle cells.
    ///
    /// Duplicate ids are harmless; an out-of-range id is an error.
    pub fn with_obstacles(
        width: i32,
        height: i32,
        obstacles: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for c in obstacles {
            grid.set_blocked(c, true)?;
        }
        Ok(grid)
    }

    /// Parse a text layout: one line per row, `#` for an obstacle and `.`
    /// for a free cell. Surrounding blank lines and indentation are ignored.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count() as i32);
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count() as i32;
            if found != width {
                return Err(GridError::InconsistentRows {
                    row: y as i32,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => {
                        let i = grid.flat(pos);
                        grid.blocked[i] = true;
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells, `width * height`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    /// The rectangle of valid points, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether `cell` is a valid id for this grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.blocked.len()
    }

    /// Row of `cell` (`id / width`).
    #[inline]
    pub fn row(&self, cell: Cell) -> i32 {
        (cell.0 / self.width as usize) as i32
    }

    /// Column of `cell` (`id % width`).
    #[inline]
    pub fn col(&self, cell: Cell) -> i32 {
        (cell.0 % self.width as usize) as i32
    }

    /// 2D position of `cell`.
    #[inline]
    pub fn point(&self, cell: Cell) -> Point {
        Point::new(self.col(cell), self.row(cell))
    }

    /// Cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn cell_at(&self, p: Point) -> Option<Cell> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(Cell(self.flat(p)))
    }

    #[inline]
    fn flat(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Whether `cell` is an obstacle. Out-of-range cells are not obstacles.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.get(cell.0).copied().unwrap_or(false)
    }

    /// Mark or unmark `cell` as an obstacle.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<(), GridError> {
        let len = self.blocked.len();
        match self.blocked.get_mut(cell.0) {
            Some(b) => {
                *b = blocked;
                Ok(())
            }
            None => Err(GridError::CellOutOfRange { cell, len }),
        }
    }

    /// Block `cell` if it is in range.
    #[inline]
    pub fn block(&mut self, cell: Cell) {
        if let Some(b) = self.blocked.get_mut(cell.0) {
            *b = true;
        }
    }

    /// Remove every obstacle.
    pub fn clear_obstacles(&mut self) {
        self.blocked.fill(false);
    }

    /// Clear obstacle status on both endpoints: an endpoint always wins over
    /// an obstacle on the same cell. Out-of-range endpoints are ignored.
    pub fn clear_endpoints(&mut self, source: Cell, target: Cell) {
        for c in [source, target] {
            if let Some(b) = self.blocked.get_mut(c.0) {
                *b = false;
            }
        }
    }

    /// Obstacle cells in increasing id order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| Cell(i))
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Cells one unit step away from `cell` in the order up, down, left,
    /// right, keeping only in-bounds, non-obstacle cells.
    ///
    /// An obstacle cannot be left, so a blocked or out-of-range `cell` has no
    /// neighbors.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let origin = (self.contains(cell) && !self.is_blocked(cell)).then(|| self.point(cell));
        origin
            .into_iter()
            .flat_map(Point::neighbors_4)
            .filter_map(|p| self.cell_at(p))
            .filter(|&c| !self.is_blocked(c))
    }
}

/// Renders the grid in the [`Grid::from_text`] layout.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.blocked.chunks(self.width as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &b in row {
                f.write_str(if b { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Wire form of a [`Grid`]: dimensions plus the sorted obstacle list.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    obstacles: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        Grid::with_obstacles(r.width, r.height, r.obstacles)
    }
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            width: g.width,
            height: g.height,
            obstacles: g.obstacles().collect(),
        }
    }
}
