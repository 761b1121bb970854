//! Mapping between terminal positions and grid indices.

use pathgrid_core::Point;

/// Terminal columns used by one grid cell. Two columns make cells roughly
/// square in most fonts.
pub const CELL_WIDTH: i32 = 2;

/// Maps pointer positions on the terminal to `(row, col)` grid indices and
/// back. The board's top-left cell is drawn at `origin`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoordMapper {
    origin: Point,
    cell_width: i32,
    cell_height: i32,
    rows: i32,
    cols: i32,
}

impl CoordMapper {
    /// A mapper for a `rows × cols` board at `origin` with the default cell
    /// size.
    pub fn new(origin: Point, rows: i32, cols: i32) -> Self {
        Self {
            origin,
            cell_width: CELL_WIDTH,
            cell_height: 1,
            rows,
            cols,
        }
    }

    /// Override the cell size in terminal cells (builder). Non-positive
    /// values are raised to 1.
    pub fn with_cell_size(mut self, width: i32, height: i32) -> Self {
        self.cell_width = width.max(1);
        self.cell_height = height.max(1);
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Grid indices under terminal position `screen`, or `None` when the
    /// position is off the board.
    pub fn to_grid(&self, screen: Point) -> Option<(i32, i32)> {
        let rel = screen - self.origin;
        if rel.x < 0 || rel.y < 0 {
            return None;
        }
        let row = rel.y / self.cell_height;
        let col = rel.x / self.cell_width;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Top-left terminal position of the cell at `(row, col)`.
    pub fn to_screen(&self, row: i32, col: i32) -> Point {
        Point::new(
            self.origin.x + col * self.cell_width,
            self.origin.y + row * self.cell_height,
        )
    }

    /// First terminal row below the board.
    pub fn below(&self) -> i32 {
        self.origin.y + self.rows * self.cell_height
    }
}
