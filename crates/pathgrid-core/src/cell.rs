//! The [`Cell`] type: one grid position with passability and search state.

use crate::geom::Point;

/// Index of a [`Cell`] inside its [`Grid`](crate::Grid), in row-major order.
///
/// Predecessor links and search endpoints are expressed as `CellId`s so that
/// cells stay plain `Copy` values and can be reset without chasing pointers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub usize);

impl CellId {
    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single grid position.
///
/// Coordinates are fixed at construction. `is_wall` is edited by the host;
/// `visited` and `predecessor` belong to the search and are cleared by
/// [`Grid::reset_search`](crate::Grid::reset_search).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    pub is_wall: bool,
    pub visited: bool,
    pub predecessor: Option<CellId>,
}

impl Cell {
    /// Create an open, unvisited cell at `(row, column)`.
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self {
            pos: Point::from_row_col(row, column),
            is_wall: false,
            visited: false,
            predecessor: None,
        }
    }

    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, is_wall: bool) -> Self {
        self.is_wall = is_wall;
        self
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub const fn column(&self) -> i32 {
        self.pos.x
    }

    /// Position as a [`Point`] (`x` = column, `y` = row).
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// Forget any state left by a previous search. The wall flag is kept.
    #[inline]
    pub fn reset_search(&mut self) {
        self.visited = false;
        self.predecessor = None;
    }
}
