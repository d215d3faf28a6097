use std::time::Duration;

/// Drop interval at level 1.
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(900);

/// Fastest drop interval, reached around level 23.
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(90);

/// Returns the gravity interval for a level.
///
/// Starts at 900 ms and shrinks by 10% per level, truncated to whole
/// milliseconds and never going below 90 ms.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::speed_for_level;
///
/// assert_eq!(speed_for_level(1), Duration::from_millis(900));
/// assert_eq!(speed_for_level(2), Duration::from_millis(810));
/// assert_eq!(speed_for_level(100), Duration::from_millis(90));
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn speed_for_level(level: usize) -> Duration {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    let base = BASE_DROP_INTERVAL.as_millis() as f64;
    let millis = (base * 0.9_f64.powi(exponent)).floor() as u64;
    Duration::from_millis(millis).max(MIN_DROP_INTERVAL)
}

/// Accumulates elapsed time and reports when gravity should pull the falling
/// piece down one row.
#[derive(Debug, Clone)]
pub struct DropClock {
    interval: Duration,
    counter: Duration,
}

impl DropClock {
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            interval: speed_for_level(level),
            counter: Duration::ZERO,
        }
    }

    /// Current gravity interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated since the last drop.
    #[must_use]
    pub fn counter(&self) -> Duration {
        self.counter
    }

    /// Recomputes the interval for a new level. The counter is kept.
    pub fn set_level(&mut self, level: usize) {
        self.interval = speed_for_level(level);
    }

    /// Adds elapsed time and returns `true` once the counter exceeds the
    /// interval. The counter keeps growing until [`Self::reset`] is called.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.counter = self.counter.saturating_add(elapsed);
        self.counter > self.interval
    }

    pub fn reset(&mut self) {
        self.counter = Duration::ZERO;
    }

    /// Speed relative to level 1 (`900 / interval`).
    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        BASE_DROP_INTERVAL.div_duration_f64(self.interval)
    }
}
