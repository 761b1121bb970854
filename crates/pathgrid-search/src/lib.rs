//! Shortest-path search on 4-connected, uniform-cost grids.
//!
//! The search is a plain breadth-first frontier expansion: on an unweighted
//! grid, first-discovered-first-expanded order already yields a path with
//! the fewest moves. Two execution modes share one rule set:
//!
//! - **Run to completion** with [`PathFinder::find_path`].
//! - **Step by step** with [`SearchRun::advance`], one dequeue-and-expand
//!   cycle per call, for hosts that animate the search frame by frame.
//!
//! Failing to reach the end cell is a normal [`SearchOutcome::Exhausted`]
//! result. Only structural mistakes (missing endpoints, foreign cell ids)
//! are reported as [`SearchError`].

mod distance;
mod error;
mod finder;
mod run;
mod state;

pub use distance::manhattan;
pub use error::SearchError;
pub use finder::{PathFinder, reconstruct_path};
pub use run::SearchRun;
pub use state::{SearchOutcome, SearchState, StepReport};
