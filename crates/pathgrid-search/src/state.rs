use pathgrid_core::CellId;

/// Where a [`SearchRun`](crate::SearchRun) is in its life cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Created, no expansion performed yet.
    #[default]
    Idle,
    /// Frontier non-empty and the end cell not dequeued yet.
    Running,
    /// The end cell was dequeued; a path is available.
    Found,
    /// The frontier emptied without reaching the end cell.
    Exhausted,
}

impl SearchState {
    /// `Found` or `Exhausted`.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Final result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// Cells from start to end inclusive.
    Found(Vec<CellId>),
    /// No path exists.
    Exhausted,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[CellId]> {
        match self {
            Self::Found(p) => Some(p),
            Self::Exhausted => None,
        }
    }

    /// Number of moves in the path (cells minus one), if one was found.
    pub fn moves(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    pub fn into_path(self) -> Option<Vec<CellId>> {
        match self {
            Self::Found(p) => Some(p),
            Self::Exhausted => None,
        }
    }
}

/// What one call to [`SearchRun::advance`](crate::SearchRun::advance)
/// observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub state: SearchState,
    /// The cell dequeued by this step (or the last one, once terminal).
    pub current: Option<CellId>,
    /// Cells newly marked visited and enqueued during this step.
    pub discovered: Vec<CellId>,
    /// Start-to-end path, present once `state` is `Found`.
    pub path: Option<Vec<CellId>>,
}

impl StepReport {
    /// Convert a terminal report into an outcome. `None` while running.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Found => Some(SearchOutcome::Found(self.path.clone().unwrap_or_default())),
            SearchState::Exhausted => Some(SearchOutcome::Exhausted),
            SearchState::Idle | SearchState::Running => None,
        }
    }
}
