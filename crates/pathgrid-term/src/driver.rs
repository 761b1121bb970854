//! Crossterm terminal driver.
//!
//! [`TermDriver`] owns the terminal session: raw mode, alternate screen and
//! mouse capture. Its [`run`](TermDriver::run) loop translates terminal
//! events into [`Command`]s for a [`Simulation`] and advances an active
//! search by one step per frame.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use log::info;
use pathgrid_core::Point;

use crate::mapper::CoordMapper;
use crate::painter::TermPainter;
use crate::simulation::{Command, Notice, Simulation};

/// What the event loop should do with a terminal event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Maps a terminal event to an [`Input`], using `mapper` for pointer
/// positions. Events off the board or without a binding map to `None`.
pub fn to_input(ev: &Event, mapper: &CoordMapper) -> Option<Input> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) => {
            if *kind == KeyEventKind::Release {
                return None;
            }
            let cmd = match code {
                KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
                KeyCode::Enter | KeyCode::Char(' ') => Command::Start,
                KeyCode::Char('w') => Command::ToggleDrawingWalls,
                KeyCode::Char('v') => Command::ToggleVisualize,
                KeyCode::Char('g') => Command::ScatterWalls,
                KeyCode::Char('r') => Command::Reset,
                _ => return None,
            };
            Some(Input::Command(cmd))
        }
        Event::Mouse(me) => {
            let pos = Point::new(i32::from(me.column), i32::from(me.row));
            let (row, col) = mapper.to_grid(pos)?;
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(Input::Command(Command::Click { row, col }))
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Input::Command(Command::Drag { row, col }))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// A terminal back-end for the simulation using crossterm.
pub struct TermDriver {
    mouse_enabled: bool,
}

impl TermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Restore the terminal. Errors are ignored: there is nothing useful to
    /// do about them on the way out.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Initialise the terminal, run the interactive loop until the user
    /// quits, then restore the terminal.
    pub fn run(&mut self, sim: &mut Simulation) -> Result<(), Box<dyn std::error::Error>> {
        self.init()?;
        let res = self.event_loop(sim);
        self.close();
        res
    }

    fn event_loop(&mut self, sim: &mut Simulation) -> Result<(), Box<dyn std::error::Error>> {
        let grid = sim.grid();
        let mapper = CoordMapper::new(Point::ZERO, grid.rows(), grid.cols());
        let mut painter = TermPainter::new(io::stdout(), mapper);
        let frame = Duration::from_secs_f64(1.0 / f64::from(sim.config().fps.max(1)));

        sim.paint_all(&mut painter);
        let mut notice: Option<Notice> = None;
        draw_status(&mut painter, sim, notice.as_ref())?;
        painter.flush()?;

        let mut last_tick = Instant::now();
        loop {
            let timeout = frame.saturating_sub(last_tick.elapsed());
            let mut dirty = false;

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let ev = event::read()?;
                    match to_input(&ev, &mapper) {
                        Some(Input::Quit) => {
                            info!("quit requested");
                            return Ok(());
                        }
                        Some(Input::Command(cmd)) => {
                            if let Some(n) = sim.handle(cmd, &mut painter)? {
                                notice = Some(n);
                            } else if matches!(cmd, Command::Start | Command::Reset) {
                                notice = None;
                            }
                            dirty = true;
                        }
                        None => {}
                    }
                }
            }

            if last_tick.elapsed() >= frame {
                last_tick = Instant::now();
                if sim.is_running() {
                    if let Some(n) = sim.tick(&mut painter) {
                        notice = Some(n);
                    }
                    dirty = true;
                }
            }

            if dirty {
                draw_status(&mut painter, sim, notice.as_ref())?;
                painter.flush()?;
            }
        }
    }
}

impl Default for TermDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Two lines below the board: modes and key help, then the latest notice.
fn draw_status<W: Write>(
    painter: &mut TermPainter<W>,
    sim: &Simulation,
    notice: Option<&Notice>,
) -> io::Result<()> {
    let y = u16::try_from(painter.mapper().below()).unwrap_or(u16::MAX);
    let on_off = |b: bool| if b { "on" } else { "off" };
    let modes = format!(
        "walls: {}  visualize: {}  | click: endpoints/walls  w: wall mode  v: visualize  \
         g: random walls  enter: start  r: reset  q: quit",
        on_off(sim.is_drawing_walls()),
        on_off(sim.is_visualizing()),
    );
    let message = notice.map(Notice::to_string).unwrap_or_default();
    let out = painter.writer();
    queue!(
        out,
        cursor::MoveTo(0, y.saturating_add(1)),
        terminal::Clear(ClearType::CurrentLine),
        Print(modes),
        cursor::MoveTo(0, y.saturating_add(2)),
        terminal::Clear(ClearType::CurrentLine),
        Print(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_inputs() {
        let m = CoordMapper::new(Point::ZERO, 5, 5);
        assert_eq!(to_input(&key(KeyCode::Char('q')), &m), Some(Input::Quit));
        assert_eq!(to_input(&key(KeyCode::Esc), &m), Some(Input::Quit));
        assert_eq!(
            to_input(&key(KeyCode::Enter), &m),
            Some(Input::Command(Command::Start))
        );
        assert_eq!(
            to_input(&key(KeyCode::Char('w')), &m),
            Some(Input::Command(Command::ToggleDrawingWalls))
        );
        assert_eq!(
            to_input(&key(KeyCode::Char('r')), &m),
            Some(Input::Command(Command::Reset))
        );
        assert_eq!(to_input(&key(KeyCode::Char('x')), &m), None);
    }

    #[test]
    fn mouse_maps_through_coordinates() {
        let m = CoordMapper::new(Point::ZERO, 5, 5);
        assert_eq!(
            to_input(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), &m),
            Some(Input::Command(Command::Click { row: 2, col: 2 }))
        );
        assert_eq!(
            to_input(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 4), &m),
            Some(Input::Command(Command::Drag { row: 4, col: 0 }))
        );
        assert_eq!(
            to_input(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 0), &m),
            None
        );
        assert_eq!(
            to_input(&mouse(MouseEventKind::Moved, 1, 1), &m),
            None
        );
    }
}
