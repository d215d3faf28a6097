use std::{mem, time::Duration};

use log::{debug, info};
use rand::Rng as _;

use crate::{
    ActionError,
    core::{
        board::Board,
        piece::{Piece, PiecePosition, RotationDirection},
    },
};

use super::{
    drop_clock::DropClock,
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
}

/// Horizontal direction of a one-column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

/// What happened when a piece was locked into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Rows removed by the sweep after the lock.
    pub cleared_lines: usize,
    /// Whether the clear raised the level.
    pub level_up: bool,
    /// Whether the next piece collided at spawn, resetting the game.
    pub game_over: bool,
}

/// Result of a soft or hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece was locked and a new one spawned.
    Locked(Placement),
}

/// A running game: board, falling and next pieces, score progression, drop
/// clock and pause state.
///
/// All mutation goes through the methods below, each of which runs to
/// completion before returning. Actions that cannot be applied leave the
/// session exactly as it was.
///
/// # Game over
///
/// When a freshly spawned piece collides, the board is cleared and the
/// score, level and line counter start over. The piece that was taken from
/// the queue stays in play and the piece sequence continues, so a game over
/// is only visible through [`Placement::game_over`] and
/// [`GameSession::game_overs`].
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    clock: DropClock,
    session_state: SessionState,
    game_overs: usize,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with a random piece seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a session whose piece sequence is fixed by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let falling_piece = Piece::new(generator.next_kind());
        let next_piece = Piece::new(generator.next_kind());
        let stats = GameStats::new();
        Self {
            board: Board::EMPTY,
            falling_piece,
            next_piece,
            generator,
            clock: DropClock::new(stats.level()),
            stats,
            session_state: SessionState::Playing,
            game_overs: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// The piece that will spawn after the current one locks.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Current gravity interval, derived from the level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Speed relative to level 1.
    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        self.clock.speed_multiplier()
    }

    /// Number of game-over resets since the session started.
    #[must_use]
    pub fn game_overs(&self) -> usize {
        self.game_overs
    }

    /// Where the falling piece would land on a hard drop.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.falling_piece.simulate_drop_position(&self.board)
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
        };
        info!("session {:?}", self.session_state);
    }

    /// Advances the drop clock by `elapsed`.
    ///
    /// Performs a soft drop when the accumulated time exceeds the drop
    /// interval. Paused sessions ignore ticks entirely.
    pub fn tick(&mut self, elapsed: Duration) -> Option<DropOutcome> {
        if self.session_state.is_paused() {
            return None;
        }
        self.clock
            .advance(elapsed)
            .then(|| self.drop_one_row())
    }

    pub fn try_move(&mut self, direction: MoveDirection) -> Result<(), ActionError> {
        self.ensure_playing()?;
        let piece = match direction {
            MoveDirection::Left => self.falling_piece.left(),
            MoveDirection::Right => self.falling_piece.right(),
        };
        if self.board.is_colliding(&piece) {
            return Err(ActionError::PieceCollision);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.try_move(MoveDirection::Left)
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.try_move(MoveDirection::Right)
    }

    /// Rotates the falling piece, applying a wall kick if needed.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> Result<(), ActionError> {
        self.ensure_playing()?;
        self.falling_piece = self
            .falling_piece
            .rotated_with_kick(&self.board, direction)
            .ok_or(ActionError::PieceCollision)?;
        Ok(())
    }

    pub fn try_rotate_right(&mut self) -> Result<(), ActionError> {
        self.try_rotate(RotationDirection::Clockwise)
    }

    pub fn try_rotate_left(&mut self) -> Result<(), ActionError> {
        self.try_rotate(RotationDirection::CounterClockwise)
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    ///
    /// The drop clock restarts whatever the outcome.
    pub fn soft_drop(&mut self) -> Result<DropOutcome, ActionError> {
        self.ensure_playing()?;
        Ok(self.drop_one_row())
    }

    /// Drops the falling piece to the lowest free position and locks it.
    pub fn hard_drop(&mut self) -> Result<Placement, ActionError> {
        self.ensure_playing()?;
        self.falling_piece = self.simulate_drop_position();
        let placement = self.lock_falling_piece();
        self.clock.reset();
        Ok(placement)
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        if self.session_state.is_paused() {
            return Err(ActionError::Paused);
        }
        Ok(())
    }

    fn drop_one_row(&mut self) -> DropOutcome {
        let piece = self.falling_piece.down();
        let outcome = if self.board.is_colliding(&piece) {
            DropOutcome::Locked(self.lock_falling_piece())
        } else {
            self.falling_piece = piece;
            DropOutcome::Fell
        };
        self.clock.reset();
        outcome
    }

    fn lock_falling_piece(&mut self) -> Placement {
        let piece = self.falling_piece;
        self.board.fill_piece(&piece);
        let cleared_lines = self.board.clear_lines();
        debug!(
            "locked {} at ({}, {}), cleared {cleared_lines} lines",
            piece.kind().as_char(),
            piece.position().x,
            piece.position().y,
        );

        let level_up = self.stats.complete_piece_drop(cleared_lines);
        if level_up {
            self.clock.set_level(self.stats.level());
            info!(
                "level up to {} (drop interval {:?})",
                self.stats.level(),
                self.clock.interval()
            );
        }

        let game_over = self.spawn();
        Placement {
            cleared_lines,
            level_up,
            game_over,
        }
    }

    /// Promotes the next piece to falling and queues a new one.
    ///
    /// Returns `true` if the promoted piece collided, in which case the game
    /// has been reset around it.
    fn spawn(&mut self) -> bool {
        let queued = Piece::new(self.generator.next_kind());
        let piece = mem::replace(&mut self.next_piece, queued);
        self.falling_piece = piece.with_position(PiecePosition::spawn(piece.matrix().size()));

        if !self.board.is_colliding(&self.falling_piece) {
            return false;
        }
        info!(
            "game over: score {}, level {}, {} pieces",
            self.stats.score(),
            self.stats.level(),
            self.stats.completed_pieces()
        );
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        self.clock.set_level(self.stats.level());
        self.game_overs += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Block, COLS, PieceKind, ROWS};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);
    const FILLED: Block = Block::Piece(PieceKind::Z);

    fn session_with(falling: PieceKind, next: PieceKind) -> GameSession {
        let mut session = GameSession::with_seed(SEED);
        session.falling_piece = Piece::new(falling);
        session.next_piece = Piece::new(next);
        session
    }

    fn fill_row_except(board: &mut Board, y: usize, holes: &[usize]) {
        for x in (0..COLS).filter(|x| !holes.contains(x)) {
            board.fill_block_at(x, y, FILLED);
        }
    }

    fn occupied(board: &Board) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for (y, row) in board.rows().enumerate() {
            for (x, block) in row.iter().enumerate() {
                if !block.is_empty() {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::with_seed(SEED);
        assert!(session.board().is_empty());
        assert!(session.session_state().is_playing());
        assert_eq!(session.stats().level(), 1);
        assert_eq!(session.drop_interval(), Duration::from_millis(900));
        assert_eq!(session.falling_piece().position().y, 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = GameSession::with_seed(SEED);
        let mut b = GameSession::with_seed(SEED);
        for _ in 0..10 {
            assert_eq!(a.falling_piece(), b.falling_piece());
            assert_eq!(a.next_piece(), b.next_piece());
            a.hard_drop().unwrap();
            b.hard_drop().unwrap();
        }
    }

    #[test]
    fn test_move_reverts_on_collision() {
        let mut session = session_with(PieceKind::O, PieceKind::T);
        for _ in 0..4 {
            session.try_move_left().unwrap();
        }
        assert_eq!(session.falling_piece().position().x, 0);
        assert_eq!(session.try_move_left(), Err(ActionError::PieceCollision));
        assert_eq!(session.falling_piece().position().x, 0);

        session.try_move(MoveDirection::Right).unwrap();
        assert_eq!(session.falling_piece().position().x, 1);
    }

    #[test]
    fn test_horizontal_collision_does_not_lock() {
        let mut session = session_with(PieceKind::O, PieceKind::T);
        session.board.fill_block_at(3, 0, FILLED);
        assert_eq!(session.try_move_left(), Err(ActionError::PieceCollision));
        assert_eq!(session.board().rows().flatten().filter(|b| !b.is_empty()).count(), 1);
        assert_eq!(session.falling_piece().kind(), PieceKind::O);
    }

    #[test]
    fn test_rotate_against_floor_is_rejected() {
        let mut session = session_with(PieceKind::I, PieceKind::T);
        // Horizontal I resting on the floor: its cells are on row 19, the
        // vertical orientation would need rows 17..=20.
        session.falling_piece = session
            .falling_piece
            .with_position(PiecePosition::new(3, 18));
        let before = *session.falling_piece();
        assert_eq!(session.try_rotate_right(), Err(ActionError::PieceCollision));
        assert_eq!(*session.falling_piece(), before);
    }

    #[test]
    fn test_soft_drop_falls_then_locks() {
        let mut session = session_with(PieceKind::O, PieceKind::T);
        for y in 1..=18 {
            assert_eq!(session.soft_drop().unwrap(), DropOutcome::Fell);
            assert_eq!(session.falling_piece().position().y, y);
        }
        let outcome = session.soft_drop().unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Locked(Placement {
                cleared_lines: 0,
                level_up: false,
                game_over: false,
            })
        );
        assert_eq!(occupied(session.board()), vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
        assert_eq!(session.falling_piece().kind(), PieceKind::T);
    }

    #[test]
    fn test_o_piece_on_floor_then_hard_drop() {
        let mut session = session_with(PieceKind::O, PieceKind::L);
        while !session.board().is_colliding(&session.falling_piece().down()) {
            assert!(session.soft_drop().unwrap().is_fell());
        }
        let placement = session.hard_drop().unwrap();
        assert_eq!(placement.cleared_lines, 0);
        assert!(!placement.game_over);
        assert_eq!(occupied(session.board()), vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
        assert_eq!(session.falling_piece().kind(), PieceKind::L);
        assert_eq!(
            session.falling_piece().position(),
            PiecePosition::new(4, 0)
        );
    }

    #[test]
    fn test_hard_drop_clears_and_scores() {
        let mut session = session_with(PieceKind::O, PieceKind::T);
        session.stats = GameStats::with_progress(0, 3, 0);
        session.clock.set_level(3);
        fill_row_except(&mut session.board, ROWS - 1, &[4, 5]);
        fill_row_except(&mut session.board, ROWS - 2, &[4, 5]);
        session.board.fill_block_at(0, ROWS - 3, FILLED);

        let placement = session.hard_drop().unwrap();
        assert_eq!(placement.cleared_lines, 2);
        assert_eq!(session.stats().score(), 600);
        assert_eq!(session.stats().lines_this_level(), 2);
        // Only the block that sat above the cleared rows remains, shifted down.
        assert_eq!(occupied(session.board()), vec![(0, ROWS - 1)]);
    }

    #[test]
    fn test_level_up_recomputes_interval() {
        let mut session = session_with(PieceKind::I, PieceKind::T);
        session.stats = GameStats::with_progress(0, 1, 4);
        fill_row_except(&mut session.board, ROWS - 1, &[3, 4, 5, 6]);

        let placement = session.hard_drop().unwrap();
        assert_eq!(placement.cleared_lines, 1);
        assert!(placement.level_up);
        assert_eq!(session.stats().level(), 2);
        assert_eq!(session.stats().lines_this_level(), 0);
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.drop_interval(), Duration::from_millis(810));
    }

    #[test]
    fn test_soft_drop_lock_scores_and_levels_up() {
        let mut session = session_with(PieceKind::I, PieceKind::T);
        session.stats = GameStats::with_progress(0, 2, 4);
        session.clock.set_level(2);
        fill_row_except(&mut session.board, ROWS - 1, &[3, 4, 5, 6]);
        // Horizontal I resting on the floor, filling the gap in the bottom row.
        session.falling_piece = session
            .falling_piece
            .with_position(PiecePosition::new(3, 18));

        let outcome = session.soft_drop().unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Locked(Placement {
                cleared_lines: 1,
                level_up: true,
                game_over: false,
            })
        );
        // Scored at the level before the level-up.
        assert_eq!(session.stats().score(), 200);
        assert_eq!(session.stats().level(), 3);
        assert_eq!(session.stats().lines_this_level(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(729));
        assert!(session.board().is_empty());
        assert_eq!(session.falling_piece().kind(), PieceKind::T);
    }

    #[test]
    fn test_spawn_collision_resets_game() {
        let mut session = session_with(PieceKind::O, PieceKind::T);
        session.stats = GameStats::with_progress(1200, 4, 3);
        session.clock.set_level(4);
        // Park the O in the bottom-left corner, away from the spawn area.
        session.falling_piece = session
            .falling_piece
            .with_position(PiecePosition::new(0, 10));
        // Block the T's spawn cells.
        session.board.fill_block_at(5, 1, FILLED);

        let placement = session.hard_drop().unwrap();
        assert!(placement.game_over);
        assert!(session.board().is_empty());
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().level(), 1);
        assert_eq!(session.stats().lines_this_level(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(900));
        assert_eq!(session.game_overs(), 1);

        // The queued piece survives the reset and is in play at its spawn point.
        assert_eq!(session.falling_piece().kind(), PieceKind::T);
        assert_eq!(
            session.falling_piece().position(),
            PiecePosition::new(4, 0)
        );
        assert!(!session.board().is_colliding(session.falling_piece()));
    }

    #[test]
    fn test_paused_session_refuses_actions() {
        let mut session = session_with(PieceKind::T, PieceKind::O);
        session.toggle_pause();
        assert!(session.session_state().is_paused());

        let before = *session.falling_piece();
        assert_eq!(session.try_move_left(), Err(ActionError::Paused));
        assert_eq!(session.try_rotate_left(), Err(ActionError::Paused));
        assert_eq!(session.soft_drop(), Err(ActionError::Paused));
        assert_eq!(session.hard_drop(), Err(ActionError::Paused));
        assert_eq!(session.tick(Duration::from_secs(10)), None);
        assert_eq!(*session.falling_piece(), before);
        assert!(session.board().is_empty());

        session.toggle_pause();
        assert!(session.session_state().is_playing());
        session.try_move_left().unwrap();
    }

    #[test]
    fn test_tick_triggers_soft_drop() {
        let mut session = session_with(PieceKind::T, PieceKind::O);
        assert_eq!(session.tick(Duration::from_millis(600)), None);
        assert_eq!(session.tick(Duration::from_millis(300)), None);
        assert_eq!(session.falling_piece().position().y, 0);

        assert_eq!(
            session.tick(Duration::from_millis(1)),
            Some(DropOutcome::Fell)
        );
        assert_eq!(session.falling_piece().position().y, 1);

        // The counter restarted with the drop.
        assert_eq!(session.tick(Duration::from_millis(900)), None);
    }

    #[test]
    fn test_soft_drop_resets_clock() {
        let mut session = session_with(PieceKind::T, PieceKind::O);
        assert_eq!(session.tick(Duration::from_millis(800)), None);
        session.soft_drop().unwrap();
        assert_eq!(session.tick(Duration::from_millis(800)), None);
        assert_eq!(session.falling_piece().position().y, 1);
    }

    #[test]
    fn test_pause_keeps_clock_counter() {
        let mut session = session_with(PieceKind::T, PieceKind::O);
        assert_eq!(session.tick(Duration::from_millis(800)), None);
        session.toggle_pause();
        session.toggle_pause();
        assert_eq!(
            session.tick(Duration::from_millis(101)),
            Some(DropOutcome::Fell)
        );
    }
}
