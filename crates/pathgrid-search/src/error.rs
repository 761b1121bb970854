use std::fmt;

use pathgrid_core::GridError;

/// Errors that prevent a search from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end cell was not designated.
    MissingEndpoints,
    /// An endpoint does not belong to the grid being searched.
    Grid(GridError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => {
                f.write_str("both start and end cells must be selected before searching")
            }
            Self::Grid(e) => write!(f, "search endpoint: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::MissingEndpoints => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
