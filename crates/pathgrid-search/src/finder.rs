//! Run-to-completion search and path reconstruction.

use log::warn;
use pathgrid_core::{CellId, Grid};

use crate::error::SearchError;
use crate::run::SearchRun;
use crate::state::SearchOutcome;

/// Entry point for searches between a designated start and end cell.
///
/// A `PathFinder` only remembers the endpoints; the frontier of an actual
/// search lives in the [`SearchRun`] it creates. Both
/// [`find_path`](Self::find_path) and [`begin`](Self::begin) share the same
/// expansion rules, so a stepped search and a synchronous one over the same
/// input end in the same state with the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFinder {
    start: Option<CellId>,
    end: Option<CellId>,
}

impl PathFinder {
    /// A finder with no endpoints chosen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A finder searching from `start` to `end`.
    pub fn with_endpoints(start: CellId, end: CellId) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    pub fn set_start(&mut self, start: Option<CellId>) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Option<CellId>) {
        self.end = end;
    }

    /// Whether both endpoints are designated.
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Create a step-wise run. Fails with
    /// [`MissingEndpoints`](SearchError::MissingEndpoints) before touching
    /// the grid if either endpoint is unset.
    pub fn begin(&self, grid: &Grid) -> Result<SearchRun, SearchError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            warn!("search rejected: endpoints not selected");
            return Err(SearchError::MissingEndpoints);
        };
        SearchRun::new(grid, start, end)
    }

    /// Search synchronously until the end cell is reached or the frontier
    /// is exhausted. Any visited/predecessor state left on `grid` by an
    /// earlier search is cleared first.
    pub fn find_path(&self, grid: &mut Grid) -> Result<SearchOutcome, SearchError> {
        let mut run = self.begin(grid)?;
        Ok(run.run_to_end(grid))
    }
}

/// Walk predecessor links back from `end` and return the path in
/// start-to-end order. The walk stops at the first cell without a
/// predecessor, which after a successful search is the start cell.
pub fn reconstruct_path(grid: &Grid, end: CellId) -> Vec<CellId> {
    let mut path: Vec<CellId> =
        std::iter::successors(Some(end), |&id| grid.get(id).and_then(|c| c.predecessor))
            .take(grid.len())
            .collect();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoints_are_rejected_before_any_work() {
        let mut g = Grid::new(3).unwrap();
        g[CellId(4)].visited = true;
        let snapshot = g.clone();

        let mut finder = PathFinder::new();
        assert_eq!(finder.find_path(&mut g), Err(SearchError::MissingEndpoints));
        finder.set_start(Some(CellId(0)));
        assert!(!finder.is_ready());
        assert_eq!(finder.find_path(&mut g), Err(SearchError::MissingEndpoints));
        assert!(matches!(finder.begin(&g), Err(SearchError::MissingEndpoints)));
        assert_eq!(g, snapshot);

        finder.set_end(Some(CellId(8)));
        assert!(finder.is_ready());
        assert!(finder.find_path(&mut g).unwrap().is_found());
    }

    #[test]
    fn find_path_on_open_grid() {
        let mut g = Grid::new(3).unwrap();
        let s = g.id(0, 0).unwrap();
        let e = g.id(0, 2).unwrap();
        let outcome = PathFinder::with_endpoints(s, e).find_path(&mut g).unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![s, g.id(0, 1).unwrap(), e])
        );
    }

    #[test]
    fn find_path_reruns_cleanly_on_same_grid() {
        let mut g = Grid::new(4).unwrap();
        let a = g.id(0, 0).unwrap();
        let b = g.id(3, 3).unwrap();
        let there = PathFinder::with_endpoints(a, b).find_path(&mut g).unwrap();
        let back = PathFinder::with_endpoints(b, a).find_path(&mut g).unwrap();
        assert_eq!(there.moves(), Some(6));
        assert_eq!(back.moves(), Some(6));
        assert_eq!(back.path().unwrap().first(), Some(&b));
        assert_eq!(back.path().unwrap().last(), Some(&a));
    }

    #[test]
    fn reconstruct_path_follows_predecessors() {
        let mut g = Grid::with_dims(1, 4).unwrap();
        g[CellId(1)].predecessor = Some(CellId(0));
        g[CellId(2)].predecessor = Some(CellId(1));
        g[CellId(3)].predecessor = Some(CellId(2));
        assert_eq!(
            reconstruct_path(&g, CellId(3)),
            vec![CellId(0), CellId(1), CellId(2), CellId(3)]
        );
        assert_eq!(reconstruct_path(&g, CellId(0)), vec![CellId(0)]);
    }

    #[test]
    fn reconstruct_path_terminates_on_corrupt_links() {
        let mut g = Grid::with_dims(1, 2).unwrap();
        g[CellId(0)].predecessor = Some(CellId(1));
        g[CellId(1)].predecessor = Some(CellId(0));
        assert_eq!(reconstruct_path(&g, CellId(1)).len(), 2);
    }
}
