//! Structural errors raised by [`Grid`](crate::Grid) construction and lookup.

use std::fmt;

/// Errors from building or indexing a grid.
///
/// Both variants are programming errors on the caller's side: a search that
/// finds no path is not an error and is never reported through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A grid was requested with a non-positive row or column count.
    InvalidDimension { rows: i32, cols: i32 },
    /// A lookup fell outside `[0, rows) × [0, cols)`.
    OutOfBounds {
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "invalid grid dimension {rows}x{cols}: both must be positive")
            }
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows}x{cols} grid"
            ),
        }
    }
}

impl std::error::Error for GridError {}
