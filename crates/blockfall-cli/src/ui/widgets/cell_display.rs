use blockfall_engine::Color;
use ratatui::{buffer::Buffer, style::Style};

use crate::ui::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const EMPTY: Self = Self {
        style: style::EMPTY,
        symbol: ". ",
    };

    pub fn filled(color: Color) -> Self {
        Self {
            style: style::CELLS[usize::from(color.get() - 1)],
            symbol: "██",
        }
    }

    pub fn from_color(color: Option<Color>) -> Self {
        color.map_or(Self::EMPTY, Self::filled)
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Draws the cell with its left column at `(x, y)`.
    pub fn draw(&self, buf: &mut Buffer, x: u16, y: u16) {
        buf.set_string(x, y, self.symbol(), self.style());
    }
}
