use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, game_display::*, key_binding_display::*, stats_display::*,
};

mod board_display;
mod cell_display;
mod game_display;
mod key_binding_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
    pub const WARNING: Style = fg_bg(color::YELLOW, color::BLACK);

    /// Cell styles indexed by color number minus one.
    pub const CELLS: [Style; 7] = [
        fg_bg(color::CYAN, color::BLACK),
        fg_bg(color::YELLOW, color::BLACK),
        fg_bg(color::MAGENTA, color::BLACK),
        fg_bg(color::BLUE, color::BLACK),
        fg_bg(color::WHITE, color::BLACK),
        fg_bg(color::GREEN, color::BLACK),
        fg_bg(color::RED, color::BLACK),
    ];
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
