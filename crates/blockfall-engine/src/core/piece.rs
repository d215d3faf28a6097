use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{COLS, board::Board};

/// Side length of the largest piece matrix (the I-piece).
pub const MAX_PIECE_SIZE: usize = 4;

/// Upper bound on the number of wall-kick offsets tried for one rotation.
const MAX_KICKS: usize = 2 * MAX_PIECE_SIZE;

/// A falling piece: its kind, the occupancy matrix of its current rotation,
/// and the board position of the matrix's top-left corner.
///
/// Pieces are values. Movement and rotation return new `Piece` instances and
/// never touch the shape table, so every piece owns its own matrix.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns), Y increases downward (rows)
/// - Positions are signed: the empty padding of a matrix may hang outside
///   the board (e.g. a vertical I-piece against the left wall)
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, RotationDirection};
///
/// let board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.right();
/// assert!(!board.is_colliding(&moved));
///
/// let rotated = moved.rotated_with_kick(&board, RotationDirection::Clockwise);
/// assert!(rotated.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    matrix: PieceMatrix,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of the given kind in its canonical orientation, centered
    /// horizontally on the top row.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let matrix = kind.matrix();
        Self {
            kind,
            matrix,
            position: PiecePosition::spawn(matrix.size()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn matrix(&self) -> &PieceMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the same piece placed at `position`.
    #[must_use]
    pub fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    /// Returns the board coordinates covered by occupied matrix cells.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .occupied_cells()
            .map(move |(dx, dy)| (self.position.x + dx as i32, self.position.y + dy as i32))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.with_position(self.position.offset(-1, 0))
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.with_position(self.position.offset(1, 0))
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.with_position(self.position.offset(0, 1))
    }

    /// Rotates the matrix a quarter turn without moving the piece.
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            matrix: self.matrix.rotated(direction),
            ..*self
        }
    }

    /// Rotates the piece and resolves a collision with a horizontal wall kick.
    ///
    /// Returns `None` when neither the rotated position nor any kick offset is
    /// free; the caller keeps the unrotated piece in that case.
    #[must_use]
    pub fn rotated_with_kick(&self, board: &Board, direction: RotationDirection) -> Option<Self> {
        let rotated = self.rotated(direction);
        if !board.is_colliding(&rotated) {
            return Some(rotated);
        }
        kick_offsets(self.matrix.size())
            .into_iter()
            .map(|dx| rotated.with_position(rotated.position.offset(dx, 0)))
            .find(|piece| !board.is_colliding(piece))
    }

    /// Returns the piece moved straight down as far as it can go.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while !board.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

/// Horizontal offsets tried, in order, when a rotated piece collides.
///
/// The piece is nudged by +1, -2, +3, -4, ... from where it stands, giving
/// the offsets +1, -1, +2, -2, ... relative to the starting column. The
/// search ends as soon as the next nudge would be positive and larger than
/// the matrix width.
fn kick_offsets(width: usize) -> ArrayVec<i32, MAX_KICKS> {
    let mut offsets = ArrayVec::new();
    let mut offset = 0;
    let mut step: i32 = 1;
    loop {
        offset += step;
        step = -(step + step.signum());
        if usize::try_from(step).is_ok_and(|step| step > width) || offsets.is_full() {
            break;
        }
        offsets.push(offset);
    }
    offsets
}

/// Position of a piece matrix's top-left corner on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for a matrix of the given size: centered, top row.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn spawn(size: usize) -> Self {
        Self::new((COLS / 2) as i32 - (size / 2) as i32, 0)
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Direction of a quarter-turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Square occupancy matrix of a piece in one orientation.
///
/// Every kind uses a square bounding box (I is padded to 4×4, O is 2×2, the
/// rest are 3×3) so that rotation is a plain transpose followed by a
/// reversal. The size never changes after the piece is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMatrix {
    size: usize,
    cells: [[bool; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceMatrix {
    const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N <= MAX_PIECE_SIZE);
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self { size: N, cells }
    }

    /// Side length of the matrix.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the rows of the matrix from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells[..self.size].iter().map(|row| &row[..self.size])
    }

    /// Returns the `(x, y)` matrix coordinates of occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, occupied)| *occupied)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Returns the matrix turned a quarter turn.
    ///
    /// Clockwise is transpose then reverse each row; counter-clockwise is
    /// transpose then reverse the row order.
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let n = self.size;
        let mut cells = [[false; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in cells[..n].iter_mut().enumerate() {
            for (x, cell) in row[..n].iter_mut().enumerate() {
                *cell = match direction {
                    RotationDirection::Clockwise => self.cells[n - 1 - x][y],
                    RotationDirection::CounterClockwise => self.cells[x][n - 1 - y],
                };
            }
        }
        Self { size: n, cells }
    }
}

/// RGB display color associated with a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns a fresh copy of the canonical matrix for this kind.
    #[must_use]
    pub const fn matrix(self) -> PieceMatrix {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceMatrix; PieceKind::LEN] = [
    // I-piece
    PieceMatrix::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    // J-piece
    PieceMatrix::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
    // L-piece
    PieceMatrix::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    // O-piece
    PieceMatrix::from_rows([[1, 1], [1, 1]]),
    // S-piece
    PieceMatrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    // T-piece
    PieceMatrix::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
    // Z-piece
    PieceMatrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
];

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor::rgb(0x00, 0xe0, 0xb8),
    PieceColor::rgb(0x5d, 0x55, 0xff),
    PieceColor::rgb(0xff, 0x9f, 0x1c),
    PieceColor::rgb(0xff, 0xd1, 0x66),
    PieceColor::rgb(0x06, 0xd6, 0xa0),
    PieceColor::rgb(0xc7, 0x7d, 0xff),
    PieceColor::rgb(0xef, 0x47, 0x6f),
];
