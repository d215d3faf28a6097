use blockfall_engine::{Block, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::{piece_color, style};

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const EMPTY: Self = Self::new(style::EMPTY, "");

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn piece(kind: PieceKind) -> Self {
        Self::new(style::piece(piece_color(kind)), "")
    }

    /// Display for a board cell. Empty cells show a grid dot when `show_dots` is set.
    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::EMPTY,
            Block::Ghost => Self::new(style::GHOST, "[]"),
            Block::Piece(kind) => Self::piece(kind),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph paints the background of the whole area, not only the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_cell_uses_piece_color() {
        let mut buf = Buffer::empty(Rect::new(0, 0, BlockDisplay::WIDTH, BlockDisplay::HEIGHT));
        BlockDisplay::from_block(Block::Piece(PieceKind::T), true).render(buf.area, &mut buf);
        let expected = piece_color(PieceKind::T);
        assert_eq!(buf[(0, 0)].bg, expected);
        assert_eq!(buf[(1, 0)].bg, expected);
    }

    #[test]
    fn test_ghost_and_dots() {
        let area = Rect::new(0, 0, BlockDisplay::WIDTH, BlockDisplay::HEIGHT);
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_block(Block::Ghost, true).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "[");
        assert_eq!(buf[(1, 0)].symbol(), "]");

        let mut buf = Buffer::empty(area);
        BlockDisplay::from_block(Block::Empty, true).render(area, &mut buf);
        let text: String = (0..2).map(|x| buf[(x, 0)].symbol()).collect();
        assert_eq!(text.trim(), ".");
    }
}
