use blockfall_engine::{ActivePiece, Board};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Settled cells of a board with the active piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<&'a ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: Option<&'a ActivePiece>) -> Self {
        Self {
            active_piece: piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        to_u16(self.board.width())
            .saturating_mul(CellDisplay::WIDTH)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        to_u16(self.board.height())
            .saturating_mul(CellDisplay::HEIGHT)
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Cells are clipped to `area`; callers size the area from `width()` and `height()`.
        let mut draw = |x: usize, y: usize, cell: CellDisplay| {
            let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                return;
            };
            let (Some(dx), Some(dy)) = (
                x.checked_mul(CellDisplay::WIDTH),
                y.checked_mul(CellDisplay::HEIGHT),
            ) else {
                return;
            };
            if dx.saturating_add(CellDisplay::WIDTH) <= area.width && dy < area.height {
                cell.draw(buf, area.x + dx, area.y + dy);
            }
        };

        for (y, row) in self.board.rows().enumerate() {
            for (x, color) in row.enumerate() {
                draw(x, y, CellDisplay::from_color(color));
            }
        }

        if let Some(piece) = self.active_piece {
            let cell = CellDisplay::filled(piece.color());
            for (x, y) in piece.occupied_cells() {
                if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                    && x < self.board.width()
                    && y < self.board.height()
                {
                    draw(x, y, cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PieceTemplate, ShapeKind};

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_size_includes_border() {
        let board = Board::new(12, 22).unwrap();
        let display = BoardDisplay::new(&board);
        assert_eq!((display.width(), display.height()), (24, 22));
        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (26, 24));
    }

    #[test]
    fn test_renders_settled_cells_and_active_piece() {
        let board = Board::from_ascii(
            "
            ....
            ....
            3..#
            ",
        );
        let piece = ActivePiece::spawn(ShapeKind::O, PieceTemplate::canonical(ShapeKind::O), 4)
            .moved(-1, 0);
        let display = BoardDisplay::new(&board).active_piece(Some(&piece));

        let mut buf = Buffer::empty(Rect::new(0, 0, display.width(), display.height()));
        display.render(buf.area, &mut buf);

        assert_eq!(row_text(&buf, 0), "████. . ");
        assert_eq!(row_text(&buf, 1), "████. . ");
        assert_eq!(row_text(&buf, 2), "██. . ██");
        assert_eq!(buf[(0, 2)].style().fg, CellDisplay::filled(color(3)).style().fg);
        assert_eq!(buf[(6, 2)].style().fg, CellDisplay::filled(color(1)).style().fg);
        assert_eq!(buf[(0, 0)].style().fg, CellDisplay::filled(color(2)).style().fg);
    }

    fn color(index: u8) -> blockfall_engine::Color {
        blockfall_engine::Color::new(index).unwrap()
    }
}
