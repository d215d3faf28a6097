use std::time::Duration;

use blockfall_engine::{GameSession, PieceSeed};
use blockfall_runtime::{App, Runtime};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::input::Intent;
use crate::{
    audio::MusicToggle,
    config::PlayConfig,
    ui::widgets::{
        KeyBindingDisplay, PAUSED_KEY_BINDINGS, PLAYING_KEY_BINDINGS, SessionDisplay,
    },
};

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    music: MusicToggle,
    fps: u32,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: &PlayConfig, seed: PieceSeed) -> Self {
        Self {
            session: GameSession::with_seed(seed),
            music: MusicToggle::new(config.music),
            fps: config.fps,
            show_ghost: config.ghost,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Applies an intent. Rejected actions are dropped.
    fn apply(&mut self, intent: Intent) {
        if self.session.session_state().is_paused() && !intent.is_live_while_paused() {
            return;
        }
        match intent {
            Intent::MoveLeft => _ = self.session.try_move_left(),
            Intent::MoveRight => _ = self.session.try_move_right(),
            Intent::SoftDrop => _ = self.session.soft_drop(),
            Intent::HardDrop => _ = self.session.hard_drop(),
            Intent::RotateClockwise => _ = self.session.try_rotate_right(),
            Intent::RotateCounterClockwise => _ = self.session.try_rotate_left(),
            Intent::TogglePause => self.session.toggle_pause(),
            Intent::ToggleMusic => _ = self.music.toggle(),
            Intent::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        let rate = f64::from(self.fps);
        runtime.set_tick_rate(Some(rate));
        runtime.set_frame_rate(Some(rate));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && let Some(intent) = Intent::from_key_event(&key)
        {
            self.apply(intent);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session)
            .show_ghost(self.show_ghost)
            .music(self.music.state());
        let bindings = if self.session.session_state().is_paused() {
            PAUSED_KEY_BINDINGS
        } else {
            PLAYING_KEY_BINDINGS
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        _ = self.session.tick(elapsed);
    }
}
