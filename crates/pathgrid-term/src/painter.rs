//! The cell-visualizer capability and its crossterm implementation.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor, Color as CtColor},
};
use pathgrid_core::Cell;

use crate::mapper::CoordMapper;
use crate::palette::ColorTag;

/// Something that can render a cell with a semantic color.
///
/// Rendering is a pure side effect: nothing returned from `draw` feeds back
/// into the search. Any closure taking `(&Cell, ColorTag)` is a painter.
pub trait CellPainter {
    fn draw(&mut self, cell: &Cell, tag: ColorTag);
}

impl<F: FnMut(&Cell, ColorTag)> CellPainter for F {
    fn draw(&mut self, cell: &Cell, tag: ColorTag) {
        self(cell, tag)
    }
}

/// Paints cells as colored blocks on a crossterm-compatible writer.
///
/// Commands are queued, not flushed; call [`flush`](Self::flush) once per
/// frame. Since `draw` cannot fail, the first I/O error is kept and later
/// draws are skipped until [`take_error`](Self::take_error) is called.
pub struct TermPainter<W: Write> {
    out: W,
    mapper: CoordMapper,
    error: Option<io::Error>,
}

impl<W: Write> TermPainter<W> {
    pub fn new(out: W, mapper: CoordMapper) -> Self {
        Self {
            out,
            mapper,
            error: None,
        }
    }

    pub fn mapper(&self) -> &CoordMapper {
        &self.mapper
    }

    /// Replace the mapper, e.g. after the board was rebuilt.
    pub fn set_mapper(&mut self, mapper: CoordMapper) {
        self.mapper = mapper;
    }

    /// The underlying writer, for drawing things that are not cells.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Return (and clear) the first I/O error seen by `draw`.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.take_error()?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CellPainter for TermPainter<W> {
    fn draw(&mut self, cell: &Cell, tag: ColorTag) {
        if self.error.is_some() {
            return;
        }
        let p = self.mapper.to_screen(cell.row(), cell.column());
        let (Ok(x), Ok(y)) = (u16::try_from(p.x), u16::try_from(p.y)) else {
            return;
        };
        let res = queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetForegroundColor(CtColor::Black),
            SetBackgroundColor(tag.color()),
            Print(tag.glyph()),
            ResetColor
        );
        if let Err(e) = res {
            self.error = Some(e);
        }
    }
}
