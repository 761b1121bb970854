//! The [`Grid`] type: a fixed-size arena of [`Cell`]s with 4-way adjacency.
//!
//! Cells are stored row-major in a single `Vec`, so a [`CellId`] is simply
//! `row * cols + col`. Dimensions never change after construction; a host
//! that wants a different board builds a new `Grid`.

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::cell::{Cell, CellId};
use crate::error::GridError;
use crate::geom::Point;

/// A rectangular grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Create a square `size × size` grid of open, unvisited cells.
    pub fn new(size: i32) -> Result<Self, GridError> {
        Self::with_dims(size, size)
    }

    /// Create a `rows × cols` grid of open, unvisited cells.
    pub fn with_dims(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Cell::new(r, c)))
            .collect();
        Ok(Self { cells, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a successfully constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(row, col)` lies inside the grid.
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && row < self.rows && col < self.cols
    }

    #[inline]
    fn offset(&self, row: i32, col: i32) -> Option<usize> {
        if self.contains(row, col) {
            Some((row * self.cols + col) as usize)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// The id of the cell at `(row, col)`.
    pub fn id(&self, row: i32, col: i32) -> Result<CellId, GridError> {
        self.offset(row, col)
            .map(CellId)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// The id of the cell at `p` (`x` = column, `y` = row).
    pub fn id_at(&self, p: Point) -> Result<CellId, GridError> {
        self.id(p.y, p.x)
    }

    /// Check that `id` belongs to this grid.
    pub fn check(&self, id: CellId) -> Result<CellId, GridError> {
        if id.0 < self.cells.len() {
            Ok(id)
        } else {
            let cols = self.cols as usize;
            Err(self.out_of_bounds((id.0 / cols) as i32, (id.0 % cols) as i32))
        }
    }

    /// The cell with the given id, or `None` if it is not part of this grid.
    #[inline]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.0)
    }

    /// The cell at `(row, col)`.
    pub fn cell(&self, row: i32, col: i32) -> Result<&Cell, GridError> {
        let id = self.id(row, col)?;
        Ok(&self.cells[id.0])
    }

    /// Mutable access to the cell at `(row, col)`.
    pub fn cell_mut(&mut self, row: i32, col: i32) -> Result<&mut Cell, GridError> {
        let id = self.id(row, col)?;
        Ok(&mut self.cells[id.0])
    }

    /// Ids of the in-bounds cells directly above, below, left and right of
    /// `(row, col)`, in that order. Walls are included; filtering is up to
    /// the caller.
    pub fn neighbors(&self, row: i32, col: i32) -> Result<Vec<CellId>, GridError> {
        let id = self.id(row, col)?;
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(id, &mut buf);
        Ok(buf)
    }

    /// Append the neighbours of `id` into `buf` (up, down, left, right).
    /// The caller clears `buf` before calling.
    pub fn neighbors_into(&self, id: CellId, buf: &mut Vec<CellId>) {
        let Some(cell) = self.get(id) else {
            return;
        };
        for n in cell.pos().neighbors_4() {
            if let Some(i) = self.offset(n.y, n.x) {
                buf.push(CellId(i));
            }
        }
    }

    /// Set the wall flag of the cell at `(row, col)`.
    pub fn set_wall(&mut self, row: i32, col: i32, is_wall: bool) -> Result<(), GridError> {
        self.cell_mut(row, col)?.is_wall = is_wall;
        Ok(())
    }

    /// Flip the wall flag of the cell at `(row, col)` and return the new value.
    pub fn toggle_wall(&mut self, row: i32, col: i32) -> Result<bool, GridError> {
        let cell = self.cell_mut(row, col)?;
        cell.is_wall = !cell.is_wall;
        Ok(cell.is_wall)
    }

    /// Make every cell passable.
    pub fn clear_walls(&mut self) {
        for c in self.cells.iter_mut() {
            c.is_wall = false;
        }
    }

    /// Clear `visited` and `predecessor` on every cell. Must run before each
    /// new search over this grid.
    pub fn reset_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }

    /// Turn each cell into a wall with probability `density` (clamped to
    /// `[0, 1]`). Cells listed in `keep_open` are left untouched. Returns the
    /// number of walls placed.
    pub fn scatter_walls<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
        keep_open: &[CellId],
    ) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for (i, c) in self.cells.iter_mut().enumerate() {
            if keep_open.contains(&CellId(i)) {
                continue;
            }
            let r: f64 = rng.random();
            if r < density {
                c.is_wall = true;
                placed += 1;
            }
        }
        placed
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Row-major iterator over `(CellId, &Cell)` pairs.
    pub fn iter_ids(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }
}

impl Index<CellId> for Grid {
    type Output = Cell;

    /// Panics if `id` does not belong to this grid.
    #[inline]
    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

impl IndexMut<CellId> for Grid {
    #[inline]
    fn index_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
