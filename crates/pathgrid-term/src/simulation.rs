//! The interactive simulation model.
//!
//! A [`Simulation`] owns the board and the selected endpoints, and drives
//! searches. It never renders anything itself: every visible change is
//! reported to the [`CellPainter`] passed into each call.

use std::fmt;

use log::{debug, info, warn};
use pathgrid_core::{CellId, Grid, GridError};
use pathgrid_search::{PathFinder, SearchError, SearchOutcome, SearchRun, SearchState};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimConfig;
use crate::painter::CellPainter;
use crate::palette::ColorTag;

/// A user request, already translated from raw input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Primary click on a board cell.
    Click { row: i32, col: i32 },
    /// Pointer dragged over a board cell with the button held.
    Drag { row: i32, col: i32 },
    Start,
    ToggleDrawingWalls,
    ToggleVisualize,
    ScatterWalls,
    Reset,
}

/// A user-facing message produced by the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    MissingEndpoints,
    NoPath,
    PathFound { moves: usize, steps: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => {
                f.write_str("You must select start and end nodes before starting!")
            }
            Self::NoPath => f.write_str("No valid path was found!"),
            Self::PathFound { moves, steps } => {
                write!(f, "Path found: {moves} moves, {steps} cells expanded")
            }
        }
    }
}

/// Board, endpoints, editing modes and the active search, if any.
pub struct Simulation {
    config: SimConfig,
    grid: Grid,
    finder: PathFinder,
    drawing_walls: bool,
    visualize: bool,
    run: Option<SearchRun>,
    rng: StdRng,
}

impl Simulation {
    /// Build a fresh board from `config` and paint every cell.
    pub fn new(config: SimConfig, painter: &mut impl CellPainter) -> Result<Self, GridError> {
        let grid = Grid::new(config.size)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sim = Self {
            visualize: config.visualize,
            config,
            grid,
            finder: PathFinder::new(),
            drawing_walls: false,
            run: None,
            rng,
        };
        sim.paint_all(painter);
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn start(&self) -> Option<CellId> {
        self.finder.start()
    }

    pub fn end(&self) -> Option<CellId> {
        self.finder.end()
    }

    pub fn is_drawing_walls(&self) -> bool {
        self.drawing_walls
    }

    pub fn is_visualizing(&self) -> bool {
        self.visualize
    }

    /// Whether an animated search is in progress.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// State of the active search, `Idle` when there is none.
    pub fn search_state(&self) -> SearchState {
        self.run.as_ref().map_or(SearchState::Idle, SearchRun::state)
    }

    /// Apply a command and return any message for the user.
    pub fn handle(
        &mut self,
        cmd: Command,
        painter: &mut impl CellPainter,
    ) -> Result<Option<Notice>, GridError> {
        match cmd {
            Command::Click { row, col } => self.click(row, col, painter)?,
            Command::Drag { row, col } => self.drag(row, col, painter)?,
            Command::Start => return Ok(self.try_start(painter)),
            Command::ToggleDrawingWalls => {
                self.toggle_drawing_walls();
            }
            Command::ToggleVisualize => {
                self.toggle_visualize();
            }
            Command::ScatterWalls => self.scatter_walls(painter),
            Command::Reset => self.reset(painter)?,
        }
        Ok(None)
    }

    /// Forget endpoints, abandon any running search and start over on a
    /// new board. The visualize setting survives.
    pub fn reset(&mut self, painter: &mut impl CellPainter) -> Result<(), GridError> {
        self.grid = Grid::new(self.config.size)?;
        self.finder = PathFinder::new();
        self.run = None;
        info!("board reset");
        self.paint_all(painter);
        Ok(())
    }

    /// The first two clicks pick the start and end cells; later clicks
    /// toggle walls. Endpoints are never turned into walls.
    pub fn click(
        &mut self,
        row: i32,
        col: i32,
        painter: &mut impl CellPainter,
    ) -> Result<(), GridError> {
        let id = self.grid.id(row, col)?;
        if self.run.is_some() {
            debug!("click at ({row}, {col}) ignored while searching");
            return Ok(());
        }

        if self.finder.start().is_none() {
            self.finder.set_start(Some(id));
            self.grid[id].is_wall = false;
            painter.draw(&self.grid[id], ColorTag::Start);
            return Ok(());
        }
        if self.finder.end().is_none() {
            if self.finder.start() == Some(id) {
                warn!("end cell must differ from start cell");
                return Ok(());
            }
            self.finder.set_end(Some(id));
            self.grid[id].is_wall = false;
            painter.draw(&self.grid[id], ColorTag::End);
            return Ok(());
        }
        if self.is_endpoint(id) {
            return Ok(());
        }

        let wall = self.grid.toggle_wall(row, col)?;
        let tag = if wall { ColorTag::Wall } else { ColorTag::Empty };
        painter.draw(&self.grid[id], tag);
        Ok(())
    }

    /// Paint a wall while dragging, when wall-drawing mode is on and both
    /// endpoints are chosen.
    pub fn drag(
        &mut self,
        row: i32,
        col: i32,
        painter: &mut impl CellPainter,
    ) -> Result<(), GridError> {
        let id = self.grid.id(row, col)?;
        if !self.drawing_walls || !self.finder.is_ready() || self.run.is_some() {
            return Ok(());
        }
        if self.is_endpoint(id) || self.grid[id].is_wall {
            return Ok(());
        }
        self.grid[id].is_wall = true;
        painter.draw(&self.grid[id], ColorTag::Wall);
        Ok(())
    }

    pub fn toggle_drawing_walls(&mut self) -> bool {
        self.drawing_walls = !self.drawing_walls;
        self.drawing_walls
    }

    pub fn toggle_visualize(&mut self) -> bool {
        self.visualize = !self.visualize;
        self.visualize
    }

    /// Add random walls at the configured density, sparing the endpoints.
    pub fn scatter_walls(&mut self, painter: &mut impl CellPainter) {
        if self.run.is_some() {
            return;
        }
        let keep: Vec<CellId> = self.finder.start().into_iter().chain(self.finder.end()).collect();
        let placed = self
            .grid
            .scatter_walls(&mut self.rng, self.config.wall_density, &keep);
        debug!("scattered {placed} walls");
        self.paint_all(painter);
    }

    /// Start a search. Without visualization the search runs to completion
    /// right away; otherwise it is advanced by [`tick`](Self::tick).
    pub fn try_start(&mut self, painter: &mut impl CellPainter) -> Option<Notice> {
        if self.run.is_some() {
            return None;
        }
        let mut run = match self.finder.begin(&self.grid) {
            Ok(run) => run,
            Err(SearchError::MissingEndpoints) => return Some(Notice::MissingEndpoints),
            Err(e) => {
                warn!("search could not start: {e}");
                return None;
            }
        };
        // clear colors left by an earlier search
        self.paint_all(painter);

        if self.visualize {
            self.run = Some(run);
            return None;
        }

        match run.run_to_end(&mut self.grid) {
            SearchOutcome::Found(path) => {
                let Some((&end, between)) = path.split_last() else {
                    return None;
                };
                for &id in between.iter().skip(1) {
                    painter.draw(&self.grid[id], ColorTag::Path);
                }
                painter.draw(&self.grid[end], ColorTag::End);
                Some(Notice::PathFound {
                    moves: path.len() - 1,
                    steps: run.steps(),
                })
            }
            SearchOutcome::Exhausted => Some(Notice::NoPath),
        }
    }

    /// Advance the active search by one step and paint what changed.
    /// Returns a notice when the search ends.
    pub fn tick(&mut self, painter: &mut impl CellPainter) -> Option<Notice> {
        let run = self.run.as_mut()?;
        let report = run.advance(&mut self.grid);

        if let Some(current) = report.current.filter(|&c| c != run.start()) {
            painter.draw(&self.grid[current], ColorTag::Visited);
        }

        match report.state {
            SearchState::Idle | SearchState::Running => None,
            SearchState::Found => {
                let path = report.path.unwrap_or_default();
                for &id in path.iter().skip(1) {
                    painter.draw(&self.grid[id], ColorTag::Path);
                }
                let steps = run.steps();
                self.run = None;
                Some(Notice::PathFound {
                    moves: path.len().saturating_sub(1),
                    steps,
                })
            }
            SearchState::Exhausted => {
                self.run = None;
                Some(Notice::NoPath)
            }
        }
    }

    fn is_endpoint(&self, id: CellId) -> bool {
        self.finder.start() == Some(id) || self.finder.end() == Some(id)
    }

    fn tag_of(&self, id: CellId) -> ColorTag {
        if self.finder.start() == Some(id) {
            ColorTag::Start
        } else if self.finder.end() == Some(id) {
            ColorTag::End
        } else if self.grid[id].is_wall {
            ColorTag::Wall
        } else {
            ColorTag::Empty
        }
    }

    /// Repaint every cell from its current role.
    pub fn paint_all(&self, painter: &mut impl CellPainter) {
        for (id, cell) in self.grid.iter_ids() {
            painter.draw(cell, self.tag_of(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathgrid_core::{Cell, Point};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Point, ColorTag)>,
    }

    impl CellPainter for Recorder {
        fn draw(&mut self, cell: &Cell, tag: ColorTag) {
            self.calls.push((cell.pos(), tag));
        }
    }

    impl Recorder {
        fn take(&mut self) -> Vec<(Point, ColorTag)> {
            std::mem::take(&mut self.calls)
        }

        fn tagged(&self, tag: ColorTag) -> Vec<Point> {
            self.calls.iter().filter(|(_, t)| *t == tag).map(|(p, _)| *p).collect()
        }
    }

    fn config(size: i32, visualize: bool) -> SimConfig {
        SimConfig {
            size,
            visualize,
            seed: Some(3),
            ..SimConfig::default()
        }
    }

    fn rc(row: i32, col: i32) -> Point {
        Point::from_row_col(row, col)
    }

    #[test]
    fn new_paints_every_cell_empty() {
        let mut p = Recorder::default();
        let sim = Simulation::new(config(3, true), &mut p).unwrap();
        assert_eq!(p.calls.len(), 9);
        assert!(p.calls.iter().all(|(_, t)| *t == ColorTag::Empty));
        assert_eq!(sim.search_state(), SearchState::Idle);
    }

    #[test]
    fn invalid_size_is_reported() {
        let mut p = Recorder::default();
        assert!(matches!(
            Simulation::new(config(0, true), &mut p),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn clicks_pick_endpoints_then_toggle_walls() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, true), &mut p).unwrap();
        p.take();

        sim.click(0, 0, &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap(); // same cell cannot be the end
        sim.click(2, 2, &mut p).unwrap();
        sim.click(1, 1, &mut p).unwrap();
        sim.click(1, 1, &mut p).unwrap();
        sim.click(2, 2, &mut p).unwrap(); // endpoint, ignored

        assert_eq!(
            p.take(),
            vec![
                (rc(0, 0), ColorTag::Start),
                (rc(2, 2), ColorTag::End),
                (rc(1, 1), ColorTag::Wall),
                (rc(1, 1), ColorTag::Empty),
            ]
        );
        assert_eq!(sim.start(), Some(sim.grid().id(0, 0).unwrap()));
        assert_eq!(sim.end(), Some(sim.grid().id(2, 2).unwrap()));
        assert!(!sim.grid().cell(2, 2).unwrap().is_wall);
    }

    #[test]
    fn out_of_bounds_click_is_an_error() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, true), &mut p).unwrap();
        assert!(matches!(
            sim.click(3, 0, &mut p),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(sim.start(), None);
    }

    #[test]
    fn drag_draws_walls_only_in_wall_mode_with_endpoints() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, true), &mut p).unwrap();
        sim.toggle_drawing_walls();
        sim.drag(1, 1, &mut p).unwrap();
        assert!(!sim.grid().cell(1, 1).unwrap().is_wall);

        sim.click(0, 0, &mut p).unwrap();
        sim.click(2, 2, &mut p).unwrap();
        p.take();
        sim.drag(1, 1, &mut p).unwrap();
        sim.drag(1, 1, &mut p).unwrap();
        sim.drag(0, 0, &mut p).unwrap();
        assert_eq!(p.take(), vec![(rc(1, 1), ColorTag::Wall)]);

        assert!(!sim.toggle_drawing_walls());
        sim.drag(1, 2, &mut p).unwrap();
        assert!(!sim.grid().cell(1, 2).unwrap().is_wall);
    }

    #[test]
    fn start_without_endpoints_asks_for_them() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, false), &mut p).unwrap();
        let notice = sim.handle(Command::Start, &mut p).unwrap();
        assert_eq!(notice, Some(Notice::MissingEndpoints));
        sim.click(0, 0, &mut p).unwrap();
        assert_eq!(sim.try_start(&mut p), Some(Notice::MissingEndpoints));
    }

    #[test]
    fn run_to_completion_paints_path_between_endpoints() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, false), &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap();
        sim.click(0, 2, &mut p).unwrap();
        p.take();

        let notice = sim.try_start(&mut p);
        assert_eq!(notice, Some(Notice::PathFound { moves: 2, steps: 6 }));
        assert_eq!(p.tagged(ColorTag::Path), vec![rc(0, 1)]);
        assert_eq!(p.calls.last(), Some(&(rc(0, 2), ColorTag::End)));
        assert!(p.tagged(ColorTag::Visited).is_empty());
        assert!(!sim.is_running());
    }

    #[test]
    fn animated_search_ticks_to_the_same_result() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(4, true), &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap();
        sim.click(3, 3, &mut p).unwrap();
        sim.click(1, 1, &mut p).unwrap();
        sim.click(2, 2, &mut p).unwrap();

        assert_eq!(sim.try_start(&mut p), None);
        assert!(sim.is_running());
        p.take();

        let mut ticks = 0;
        let notice = loop {
            ticks += 1;
            if let Some(n) = sim.tick(&mut p) {
                break n;
            }
            assert_eq!(sim.search_state(), SearchState::Running);
        };
        assert!(!sim.is_running());
        assert_eq!(sim.tick(&mut p), None);

        let Notice::PathFound { moves, steps } = notice else {
            panic!("expected a path, got {notice:?}");
        };
        assert_eq!(moves, 6);
        assert_eq!(steps, ticks);
        // the start cell is never repainted as visited
        assert!(!p.tagged(ColorTag::Visited).contains(&rc(0, 0)));
        let path = p.tagged(ColorTag::Path);
        assert_eq!(path.len(), 6);
        assert!(!path.contains(&rc(0, 0)));
        assert!(path.contains(&rc(3, 3)));

        let mut q = Recorder::default();
        let mut sync = Simulation::new(config(4, false), &mut q).unwrap();
        for (r, c) in [(0, 0), (3, 3), (1, 1), (2, 2)] {
            sync.click(r, c, &mut q).unwrap();
        }
        assert_eq!(
            sync.try_start(&mut q),
            Some(Notice::PathFound { moves, steps })
        );
    }

    #[test]
    fn walled_off_end_reports_no_path() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, true), &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap();
        sim.click(2, 0, &mut p).unwrap();
        for col in 0..3 {
            sim.click(1, col, &mut p).unwrap();
        }
        sim.try_start(&mut p);
        let mut notice = None;
        for _ in 0..10 {
            notice = sim.tick(&mut p);
            if notice.is_some() {
                break;
            }
        }
        assert_eq!(notice, Some(Notice::NoPath));
        assert_eq!(notice.map(|n| n.to_string()).as_deref(), Some("No valid path was found!"));
    }

    #[test]
    fn edits_are_ignored_while_searching() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(5, true), &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap();
        sim.click(4, 4, &mut p).unwrap();
        sim.try_start(&mut p);
        sim.tick(&mut p);
        sim.click(2, 2, &mut p).unwrap();
        sim.scatter_walls(&mut p);
        assert_eq!(sim.grid().wall_count(), 0);
        assert_eq!(sim.try_start(&mut p), None);
        assert!(sim.is_running());
    }

    #[test]
    fn reset_clears_board_but_keeps_visualize() {
        let mut p = Recorder::default();
        let mut sim = Simulation::new(config(3, true), &mut p).unwrap();
        assert!(!sim.toggle_visualize());
        sim.click(0, 0, &mut p).unwrap();
        sim.click(1, 1, &mut p).unwrap();
        sim.click(2, 2, &mut p).unwrap();
        p.take();

        sim.handle(Command::Reset, &mut p).unwrap();
        assert_eq!(sim.start(), None);
        assert_eq!(sim.end(), None);
        assert_eq!(sim.grid().wall_count(), 0);
        assert!(!sim.is_visualizing());
        assert_eq!(p.calls.len(), 9);
        assert!(p.calls.iter().all(|(_, t)| *t == ColorTag::Empty));
    }

    #[test]
    fn scatter_walls_spares_endpoints() {
        let mut p = Recorder::default();
        let cfg = SimConfig {
            wall_density: 1.0,
            ..config(4, true)
        };
        let mut sim = Simulation::new(cfg, &mut p).unwrap();
        sim.click(0, 0, &mut p).unwrap();
        sim.click(3, 3, &mut p).unwrap();
        p.take();
        sim.handle(Command::ScatterWalls, &mut p).unwrap();
        assert_eq!(sim.grid().wall_count(), 14);
        assert_eq!(p.tagged(ColorTag::Start), vec![rc(0, 0)]);
        assert_eq!(p.tagged(ColorTag::End), vec![rc(3, 3)]);
        assert_eq!(sim.try_start(&mut p), None);
        assert_eq!(sim.tick(&mut p), Some(Notice::NoPath));
    }
}
