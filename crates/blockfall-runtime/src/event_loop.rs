use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Event loop state management.
///
/// Ticks are emitted every `tick_interval` and carry the real time elapsed
/// since the previous tick. Renders happen after any state change (tick or
/// crossterm event), at most once per `frame_interval` when one is set.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    frame_interval: Option<Duration>,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled and unthrottled rendering.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            tick_interval: None,
            frame_interval: None,
            last_tick: now,
            // Allow the first render immediately.
            last_render: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
            dirty: true,
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events. The elapsed time is measured from now on.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    /// Sets the minimum interval between renders.
    pub(super) fn set_frame_interval(&mut self, interval: Option<Duration>) {
        self.frame_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval {
            let elapsed = now.duration_since(self.last_tick);
            if elapsed >= tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick(elapsed));
            }
        }

        if self.dirty && self.next_render_at().is_none_or(|at| now >= at) {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }

        None
    }

    fn next_render_at(&self) -> Option<Instant> {
        self.frame_interval
            .map(|interval| self.last_render + interval)
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = self
            .dirty
            .then(|| self.next_render_at().unwrap_or(now));
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
