use blockfall_engine::{MAX_PIECE_SIZE, PieceKind, PieceMatrix};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of a single piece, trimmed to its occupied cells and centered.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<(PieceKind, PieceMatrix)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, kind: PieceKind, matrix: PieceMatrix) -> Self {
        Self {
            piece: Some((kind, matrix)),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MAX_PIECE_SIZE as u16 * BlockDisplay::WIDTH + super::block_margin(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::HEIGHT + super::block_margin(self.block.as_ref()).1
    }
}

/// Bounding box `(x, y, width, height)` of the occupied cells.
fn occupied_bounds(matrix: &PieceMatrix) -> Option<(usize, usize, usize, usize)> {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (usize::MAX, usize::MAX, 0, 0);
    for (x, y) in matrix.occupied_cells() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (min_x <= max_x).then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        BlockDisplay::EMPTY.render(area, buf);

        let Some((kind, matrix)) = &self.piece else {
            return;
        };
        let Some((left, top, width, height)) = occupied_bounds(matrix) else {
            return;
        };
        let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
            return;
        };

        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::WIDTH),
            Constraint::Length(height * BlockDisplay::HEIGHT),
        );
        let occupied_block = BlockDisplay::piece(*kind);
        for (x, y) in matrix.occupied_cells() {
            let (Ok(dx), Ok(dy)) = (u16::try_from(x - left), u16::try_from(y - top)) else {
                continue;
            };
            let cell = Rect::new(
                piece_area.x + dx * BlockDisplay::WIDTH,
                piece_area.y + dy * BlockDisplay::HEIGHT,
                BlockDisplay::WIDTH,
                BlockDisplay::HEIGHT,
            )
            .intersection(piece_area);
            Widget::render(&occupied_block, cell, buf);
        }
    }
}
