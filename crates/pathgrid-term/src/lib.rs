//! Host side of pathgrid: everything the search engine deliberately knows
//! nothing about.
//!
//! - [`ColorTag`] and the [`CellPainter`] capability through which cells are
//!   rendered.
//! - [`CoordMapper`], turning terminal positions into grid indices.
//! - [`Simulation`], the interactive model: endpoint picking, wall editing,
//!   and driving a [`SearchRun`](pathgrid_search::SearchRun) one tick at a
//!   time.
//! - [`TermDriver`], the crossterm event loop, and [`TermPainter`].

pub mod config;
pub mod driver;
pub mod mapper;
pub mod painter;
pub mod palette;
pub mod simulation;

pub use config::{Cli, SimConfig};
pub use driver::{Input, TermDriver, to_input};
pub use mapper::CoordMapper;
pub use painter::{CellPainter, TermPainter};
pub use palette::ColorTag;
pub use simulation::{Command, Notice, Simulation};
