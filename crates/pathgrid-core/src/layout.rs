//! Boards described as ASCII text.
//!
//! A [`Layout`] parses a block of text into a [`Grid`] plus optional start
//! and end markers:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | open cell |
//! | `#` | wall |
//! | `S` | start (open) |
//! | `E` | end (open) |
//!
//! Every line must have the same width. Leading and trailing whitespace is
//! trimmed from the whole string but not from individual lines.

use std::fmt;
use std::str::FromStr;

use crate::cell::CellId;
use crate::error::GridError;
use crate::geom::Point;
use crate::grid::Grid;

pub const OPEN: char = '.';
pub const WALL: char = '#';
pub const START: char = 'S';
pub const END: char = 'E';

/// A parsed board: the grid and the endpoints marked in the text.
#[derive(Debug, Clone)]
pub struct Layout {
    grid: Grid,
    start: Option<CellId>,
    end: Option<CellId>,
}

impl Layout {
    /// Parse a layout from text.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines[0].chars().count();
        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(LayoutError::InconsistentSize(s.to_string()));
        }

        let mut grid = Grid::with_dims(lines.len() as i32, width as i32)?;
        let mut start = None;
        let mut end = None;

        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let id = grid.id_at(pos)?;
                match ch {
                    OPEN => {}
                    WALL => grid[id].is_wall = true,
                    START => {
                        if start.replace(id).is_some() {
                            return Err(LayoutError::DuplicateMarker(START));
                        }
                    }
                    END => {
                        if end.replace(id).is_some() {
                            return Err(LayoutError::DuplicateMarker(END));
                        }
                    }
                    _ => return Err(LayoutError::InvalidRune { ch, pos }),
                }
            }
        }

        Ok(Self { grid, start, end })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    /// Split into `(grid, start, end)`.
    pub fn into_parts(self) -> (Grid, Option<CellId>, Option<CellId>) {
        (self.grid, self.start, self.end)
    }

    /// Render back to text, marking the cells in `path` (except the
    /// endpoints) with `mark`.
    pub fn render(&self, path: &[CellId], mark: char) -> String {
        let mut out = String::with_capacity(self.grid.len() + self.grid.rows() as usize);
        for (id, cell) in self.grid.iter_ids() {
            if cell.column() == 0 && cell.row() > 0 {
                out.push('\n');
            }
            let ch = if Some(id) == self.start {
                START
            } else if Some(id) == self.end {
                END
            } else if cell.is_wall {
                WALL
            } else if path.contains(&id) {
                mark
            } else {
                OPEN
            };
            out.push(ch);
        }
        out
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The text contains no cells.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside `.#SE` was found.
    InvalidRune { ch: char, pos: Point },
    /// More than one `S` or `E` marker.
    DuplicateMarker(char),
    /// The resulting grid could not be built.
    Grid(GridError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no cells"),
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent line widths:\n{s}"),
            Self::InvalidRune { ch, pos } => write!(
                f,
                "layout contains invalid rune \u{201c}{ch}\u{201d} at ({}, {})",
                pos.x, pos.y
            ),
            Self::DuplicateMarker(ch) => write!(f, "layout: marker '{ch}' appears more than once"),
            Self::Grid(e) => write!(f, "layout: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LayoutError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S.#.
..#.
...E";

    #[test]
    fn parse_dimensions_and_markers() {
        let l = Layout::parse(ROOM).unwrap();
        let g = l.grid();
        assert_eq!((g.rows(), g.cols()), (3, 4));
        assert_eq!(l.start(), Some(g.id(0, 0).unwrap()));
        assert_eq!(l.end(), Some(g.id(2, 3).unwrap()));
        assert!(g.cell(0, 2).unwrap().is_wall);
        assert!(g.cell(1, 2).unwrap().is_wall);
        assert_eq!(g.wall_count(), 2);
    }

    #[test]
    fn markers_are_optional() {
        let l: Layout = "..\n#.".parse().unwrap();
        assert_eq!(l.start(), None);
        assert_eq!(l.end(), None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let l = Layout::parse("\n  ..\n..  \n").unwrap();
        assert_eq!((l.grid().rows(), l.grid().cols()), (2, 2));
        // whitespace inside the block is not trimmed per line
        assert_eq!(
            Layout::parse("..\n .\n..").unwrap_err(),
            LayoutError::InvalidRune {
                ch: ' ',
                pos: Point::new(0, 1)
            }
        );
    }

    #[test]
    fn inconsistent_size_error() {
        assert!(matches!(
            Layout::parse("..\n..."),
            Err(LayoutError::InconsistentSize(_))
        ));
    }

    #[test]
    fn invalid_rune_reports_position() {
        assert_eq!(
            Layout::parse("..\n.x").unwrap_err(),
            LayoutError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn duplicate_marker_error() {
        assert_eq!(
            Layout::parse("S.S").unwrap_err(),
            LayoutError::DuplicateMarker('S')
        );
        assert_eq!(
            Layout::parse("E\nE").unwrap_err(),
            LayoutError::DuplicateMarker('E')
        );
    }

    #[test]
    fn empty_layout_error() {
        assert_eq!(Layout::parse("  \n ").unwrap_err(), LayoutError::Empty);
    }

    #[test]
    fn render_marks_path() {
        let l = Layout::parse(ROOM).unwrap();
        let g = l.grid();
        let path: Vec<CellId> = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (2, 3)]
            .iter()
            .map(|&(r, c)| g.id(r, c).unwrap())
            .collect();
        assert_eq!(l.render(&path, '*'), "S.#.\n*.#.\n***E");
        assert_eq!(l.render(&[], '*'), ROOM);
    }
}
