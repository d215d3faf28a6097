use log::info;

/// Whether background music is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display, derive_more::IsVariant)]
pub enum MusicState {
    #[default]
    #[display("OFF")]
    Off,
    #[display("ON")]
    On,
}

/// Background music switch.
///
/// Independent of the game: pausing or resetting a session leaves it alone.
#[derive(Debug, Default)]
pub struct MusicToggle {
    state: MusicState,
}

impl MusicToggle {
    pub fn new(enabled: bool) -> Self {
        let state = if enabled {
            MusicState::On
        } else {
            MusicState::Off
        };
        Self { state }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn toggle(&mut self) -> MusicState {
        self.state = match self.state {
            MusicState::Off => MusicState::On,
            MusicState::On => MusicState::Off,
        };
        info!("music {}", self.state);
        self.state
    }
}
