use blockfall_engine::Engine;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::{
    input::KEY_BINDINGS,
    ui::widgets::{BoardDisplay, KeyBindingDisplay, StatsDisplay, color, style},
};

/// The whole play screen: board, stats panel, key bindings and the game-over banner.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    engine: &'a Engine,
}

impl<'a> GameDisplay<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.engine.is_game_over() {
            color::RED
        } else {
            color::WHITE
        };
        let board = BoardDisplay::new(self.engine.board())
            .active_piece(self.engine.active_piece())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let stats = StatsDisplay::new(self.engine.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let spacing = 1;
        let required_width = board
            .width()
            .saturating_add(spacing)
            .saturating_add(stats.width());
        let required_height = u16::max(board.height(), stats.height()).saturating_add(1);
        if area.width < required_width || area.height < required_height {
            let message = format!(
                "Terminal too small: need {required_width}x{required_height}, have {}x{}",
                area.width, area.height
            );
            Paragraph::new(message)
                .style(style::WARNING)
                .centered()
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(required_height - 1), Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(area);
        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(spacing)
        .areas(main_area);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let board_width = board.width();
        board.render(board_area, buf);
        stats.render(stats_area, buf);
        KeyBindingDisplay::new(KEY_BINDINGS).render(help_area, buf);

        if self.engine.is_game_over() {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::styled("GAME OVER", style::GAME_OVER).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
