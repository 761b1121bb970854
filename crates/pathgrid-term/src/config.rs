//! Runtime configuration and command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Settings for an interactive [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Rows and columns of the square board.
    pub size: i32,
    /// Search steps per second while animating.
    pub fps: u32,
    /// Animate searches step by step instead of running them at once.
    pub visualize: bool,
    /// Probability that a cell becomes a wall when scattering random walls.
    pub wall_density: f64,
    /// Seed for random walls; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 25,
            fps: 60,
            visualize: true,
            wall_density: 0.25,
            seed: None,
        }
    }
}

/// Shortest paths on a grid, animated in the terminal.
#[derive(Parser, Debug)]
#[command(name = "pathgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Rows and columns of the board
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(i32).range(1..=200))]
    pub size: i32,

    /// Search steps per second while animating
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// Run searches to completion instead of animating them
    #[arg(long)]
    pub no_visualize: bool,

    /// Chance that a cell becomes a wall when scattering random walls
    #[arg(long, default_value_t = 0.25)]
    pub wall_density: f64,

    /// Seed for random walls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Solve an ASCII layout file (`.` open, `#` wall, `S` start, `E` end)
    /// and print the result instead of opening the interactive board
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            size: self.size,
            fps: self.fps,
            visualize: !self.no_visualize,
            wall_density: self.wall_density,
            seed: self.seed,
        }
    }
}
