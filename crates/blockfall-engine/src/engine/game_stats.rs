/// Lines that must be cleared within a level to reach the next one.
pub const LINES_PER_LEVEL: usize = 5;

/// Points per cleared line, multiplied by the current level.
const POINTS_PER_LINE: usize = 100;

/// Score and level progression of one game.
///
/// # Scoring
///
/// Each lock that clears lines adds `lines * 100 * level`, using the level in
/// effect before the lock. There are no multi-line, combo or T-spin bonuses.
///
/// # Leveling
///
/// Cleared lines accumulate in a per-level counter. Once it reaches
/// [`LINES_PER_LEVEL`] the level goes up by one and the counter restarts at
/// zero, dropping any excess lines.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.level(), 1);
///
/// assert!(stats.complete_piece_drop(1));
/// assert_eq!(stats.level(), 2);
/// assert_eq!(stats.lines_this_level(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    lines_this_level: usize,
    total_cleared_lines: usize,
    completed_pieces: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates the statistics of a fresh game: level 1, everything else zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_this_level: 0,
            total_cleared_lines: 0,
            completed_pieces: 0,
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_progress(score: usize, level: usize, lines_this_level: usize) -> Self {
        Self {
            score,
            level,
            lines_this_level,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Lines cleared since the last level-up (always below [`LINES_PER_LEVEL`]).
    #[must_use]
    pub const fn lines_this_level(&self) -> usize {
        self.lines_this_level
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Number of pieces locked in this game.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Level progress formatted as `"n/5"`.
    #[must_use]
    pub fn level_progress(&self) -> String {
        format!(
            "{}/{LINES_PER_LEVEL}",
            self.lines_this_level.min(LINES_PER_LEVEL)
        )
    }

    /// Updates statistics after a piece is locked.
    ///
    /// Returns `true` if the level went up.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> bool {
        self.completed_pieces += 1;
        if cleared_lines == 0 {
            return false;
        }
        self.score += cleared_lines * POINTS_PER_LINE * self.level;
        self.total_cleared_lines += cleared_lines;
        self.lines_this_level += cleared_lines;
        if self.lines_this_level >= LINES_PER_LEVEL {
            self.level += 1;
            self.lines_this_level = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.lines_this_level(), 0);
        assert_eq!(stats.level_progress(), "0/5");
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut stats = GameStats::with_progress(0, 3, 0);
        assert!(!stats.complete_piece_drop(2));
        assert_eq!(stats.score(), 600);
        assert_eq!(stats.level_progress(), "2/5");
    }

    #[test]
    fn test_empty_lock_scores_nothing() {
        let mut stats = GameStats::new();
        assert!(!stats.complete_piece_drop(0));
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
    }

    #[test]
    fn test_level_up_after_five_single_lines() {
        let mut stats = GameStats::new();
        for _ in 0..4 {
            assert!(!stats.complete_piece_drop(1));
        }
        assert_eq!(stats.level_progress(), "4/5");
        assert!(stats.complete_piece_drop(1));
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines_this_level(), 0);
        assert_eq!(stats.score(), 500);
    }

    #[test]
    fn test_level_up_after_four_plus_one() {
        let mut stats = GameStats::new();
        assert!(!stats.complete_piece_drop(4));
        assert!(stats.complete_piece_drop(1));
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines_this_level(), 0);
        // The level-up line is scored at the old level.
        assert_eq!(stats.score(), 500);
    }

    #[test]
    fn test_overflow_lines_are_dropped() {
        let mut stats = GameStats::with_progress(0, 1, 3);
        assert!(stats.complete_piece_drop(4));
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines_this_level(), 0);
        assert_eq!(stats.total_cleared_lines(), 4);
    }
}
