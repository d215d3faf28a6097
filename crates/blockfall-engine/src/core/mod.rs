pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Number of columns on the board.
pub const COLS: usize = 10;
/// Number of rows on the board.
pub const ROWS: usize = 20;
