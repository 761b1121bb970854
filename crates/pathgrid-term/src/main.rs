//! `pathgrid`: interactive shortest-path board, or a one-shot solver for
//! ASCII layouts.
//!
//! Run: cargo run --bin pathgrid -- --size 30

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use log::info;
use pathgrid_core::{Cell, Layout};
use pathgrid_search::{PathFinder, SearchOutcome};
use pathgrid_term::{Cli, ColorTag, Simulation, TermDriver};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let interactive = cli.layout.is_none();
    init_logging(cli.log_file.as_deref(), interactive)?;
    info!("pathgrid v{}", env!("CARGO_PKG_VERSION"));

    match &cli.layout {
        Some(path) => solve_layout(path),
        None => {
            // the driver paints the whole board once the terminal is ready
            let mut sim = Simulation::new(cli.sim_config(), &mut |_: &Cell, _: ColorTag| {})?;
            TermDriver::new().run(&mut sim)
        }
    }
}

/// Logs go to `log_file` when given. Otherwise they go to stderr, except in
/// interactive mode where stderr shares the screen with the board.
fn init_logging(
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn solve_layout(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let mut layout = Layout::parse(&text)?;
    let mut finder = PathFinder::new();
    finder.set_start(layout.start());
    finder.set_end(layout.end());

    let outcome = finder.find_path(layout.grid_mut())?;
    match &outcome {
        SearchOutcome::Found(cells) => {
            println!("{}", layout.render(cells, '*'));
            println!("Path found: {} moves", cells.len() - 1);
        }
        SearchOutcome::Exhausted => {
            println!("{}", layout.render(&[], '*'));
            println!("No valid path was found!");
        }
    }
    Ok(())
}
