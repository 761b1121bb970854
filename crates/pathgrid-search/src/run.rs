//! The resumable, one-step-at-a-time search driver.

use std::collections::VecDeque;

use log::{debug, trace};
use pathgrid_core::{CellId, Grid};

use crate::error::SearchError;
use crate::finder::reconstruct_path;
use crate::state::{SearchOutcome, SearchState, StepReport};

/// An in-progress breadth-first search between two cells of a [`Grid`].
///
/// The run owns the frontier and its own status; visited flags and
/// predecessor links live on the grid's cells. The host keeps the grid and
/// passes it to every [`advance`](Self::advance) call, so it stays free to
/// read (and paint) the grid between ticks. Only one run may be advanced
/// against a given grid at a time, and it must always be the same grid.
///
/// Dropping a run at any point is safe: it holds no external resources.
#[derive(Debug, Clone)]
pub struct SearchRun {
    start: CellId,
    end: CellId,
    frontier: VecDeque<CellId>,
    state: SearchState,
    current: Option<CellId>,
    steps: usize,
    path: Option<Vec<CellId>>,
    // scratch buffer for neighbor queries
    nbuf: Vec<CellId>,
}

impl SearchRun {
    /// Prepare a search from `start` to `end`. The grid is only checked,
    /// not modified; the first [`advance`](Self::advance) clears stale
    /// search state and seeds the frontier.
    pub fn new(grid: &Grid, start: CellId, end: CellId) -> Result<Self, SearchError> {
        grid.check(start)?;
        grid.check(end)?;
        Ok(Self {
            start,
            end,
            frontier: VecDeque::new(),
            state: SearchState::Idle,
            current: None,
            steps: 0,
            path: None,
            nbuf: Vec::with_capacity(4),
        })
    }

    #[inline]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> CellId {
        self.end
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The most recently dequeued cell.
    #[inline]
    pub fn current(&self) -> Option<CellId> {
        self.current
    }

    /// Number of dequeue-and-expand cycles performed so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Cells discovered but not yet expanded, in expansion order.
    pub fn frontier(&self) -> impl ExactSizeIterator<Item = CellId> + '_ {
        self.frontier.iter().copied()
    }

    /// The start-to-end path, once found.
    pub fn path(&self) -> Option<&[CellId]> {
        self.path.as_deref()
    }

    /// Every cell currently marked visited, in row-major order. This is the
    /// intermediate state a host may choose to render after each step.
    pub fn visited(&self, grid: &Grid) -> Vec<CellId> {
        grid.iter_ids()
            .filter(|(_, c)| c.visited)
            .map(|(id, _)| id)
            .collect()
    }

    /// The final outcome, or `None` while the search is not finished.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Found => Some(SearchOutcome::Found(
                self.path.clone().unwrap_or_default(),
            )),
            SearchState::Exhausted => Some(SearchOutcome::Exhausted),
            SearchState::Idle | SearchState::Running => None,
        }
    }

    fn seed(&mut self, grid: &mut Grid) {
        grid.reset_search();
        self.frontier.clear();
        // The start cell is expanded even when it is flagged as a wall.
        grid[self.start].visited = true;
        self.frontier.push_back(self.start);
        self.state = SearchState::Running;
        debug!(
            "search started: {} -> {} on {}x{} grid",
            grid[self.start].pos(),
            grid[self.end].pos(),
            grid.rows(),
            grid.cols()
        );
    }

    fn report(&self, discovered: Vec<CellId>) -> StepReport {
        StepReport {
            state: self.state,
            current: self.current,
            discovered,
            path: self.path.clone(),
        }
    }

    /// Perform exactly one dequeue-and-expand cycle and report the result.
    ///
    /// Once the run is `Found` or `Exhausted`, further calls return the same
    /// terminal report and leave the grid untouched.
    pub fn advance(&mut self, grid: &mut Grid) -> StepReport {
        match self.state {
            SearchState::Idle => self.seed(grid),
            SearchState::Running => {}
            SearchState::Found | SearchState::Exhausted => return self.report(Vec::new()),
        }

        let Some(current) = self.frontier.pop_front() else {
            self.state = SearchState::Exhausted;
            return self.report(Vec::new());
        };
        self.steps += 1;
        self.current = Some(current);
        grid[current].visited = true;

        if current == self.end {
            let path = reconstruct_path(grid, current);
            debug!(
                "search found a path of {} moves after {} steps",
                path.len() - 1,
                self.steps
            );
            self.path = Some(path);
            self.state = SearchState::Found;
            return self.report(Vec::new());
        }

        let mut discovered = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        grid.neighbors_into(current, &mut nbuf);
        for &n in nbuf.iter() {
            let cell = &mut grid[n];
            if cell.is_wall || cell.visited {
                continue;
            }
            cell.visited = true;
            cell.predecessor = Some(current);
            self.frontier.push_back(n);
            discovered.push(n);
        }
        self.nbuf = nbuf;

        trace!(
            "step {}: expanded {}, discovered {}, frontier {}",
            self.steps,
            grid[current].pos(),
            discovered.len(),
            self.frontier.len()
        );

        if self.frontier.is_empty() {
            debug!("search exhausted after {} steps", self.steps);
            self.state = SearchState::Exhausted;
        }
        self.report(discovered)
    }

    /// Advance until the run reaches a terminal state.
    pub fn run_to_end(&mut self, grid: &mut Grid) -> SearchOutcome {
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            self.advance(grid);
        }
    }
}
