//! Semantic colors for cells and their terminal rendering.

use crossterm::style::Color as CtColor;

/// What a cell currently represents, independent of how it is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorTag {
    Wall,
    Start,
    End,
    Visited,
    Path,
    Empty,
}

impl ColorTag {
    /// Background color used by the terminal painter.
    pub const fn color(self) -> CtColor {
        match self {
            Self::Wall => CtColor::Rgb { r: 40, g: 40, b: 48 },
            Self::Start => CtColor::Rgb { r: 46, g: 160, b: 67 },
            Self::End => CtColor::Rgb { r: 207, g: 34, b: 46 },
            Self::Visited => CtColor::Rgb { r: 84, g: 174, b: 255 },
            Self::Path => CtColor::Rgb { r: 240, g: 200, b: 40 },
            Self::Empty => CtColor::Rgb { r: 230, g: 230, b: 230 },
        }
    }

    /// Two-column glyph drawn on top of the background.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Start => "S ",
            Self::End => "E ",
            _ => "  ",
        }
    }
}
