use super::{
    COLS, ROWS,
    piece::{Piece, PieceKind},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Block {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Ghost piece preview (shows where piece will land).
    ///
    /// Only written into copies of the board made for rendering.
    Ghost,
    /// Locked block of a specific piece type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// One row of cells, left to right.
pub type BoardRow = [Block; COLS];

const EMPTY_ROW: BoardRow = [Block::Empty; COLS];

/// The COLS×ROWS playfield.
///
/// Cells are changed only by locking a piece ([`Board::fill_piece`]) and by
/// clearing full rows ([`Board::clear_lines`]). Everything outside the grid
/// counts as occupied for collision purposes, including the space above the
/// top row.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O).simulate_drop_position(&board);
/// board.fill_piece(&piece);
/// assert_eq!(board.clear_lines(), 0);
/// assert!(!board.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|block| block.is_empty())
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.cell(x, y)
    }

    fn cell_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get_mut(y).and_then(|row| row.get_mut(x))
    }

    /// Returns `true` if any occupied cell of the piece lies outside the board
    /// or on a non-empty cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(x, y)| self.cell_at(x, y).is_none_or(|block| !block.is_empty()))
    }

    /// Locks the piece into the board.
    ///
    /// The piece must be at a non-colliding position.
    pub fn fill_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, Block::Piece(piece.kind()));
    }

    /// Writes `block` into every cell covered by the piece.
    ///
    /// Used directly for ghost previews on a copy of the board.
    pub fn fill_piece_as(&mut self, piece: &Piece, block: Block) {
        for (x, y) in piece.occupied_positions() {
            if let Some(cell) = self.cell_at_mut(x, y) {
                *cell = block;
            }
        }
    }

    /// Sets a single cell. Coordinates outside the board are ignored.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = block;
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. When a row is removed the rows above it
    /// shift down by one and an empty row enters at the top, so the same index
    /// is examined again before moving up.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = ROWS;
        while y > 0 {
            if self.rows[y - 1].iter().all(|block| !block.is_empty()) {
                self.rows[..y].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }
}
