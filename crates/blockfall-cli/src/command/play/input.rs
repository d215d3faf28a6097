use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateClockwise,
    RotateCounterClockwise,
    TogglePause,
    ToggleMusic,
    Quit,
}

impl Intent {
    /// Maps a key event to an intent.
    ///
    /// Only presses count; repeats and releases are ignored.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let intent = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Left => Self::MoveLeft,
            KeyCode::Right => Self::MoveRight,
            KeyCode::Down => Self::SoftDrop,
            KeyCode::Char(' ') => Self::HardDrop,
            KeyCode::Up | KeyCode::Char('x' | 'X') => Self::RotateClockwise,
            KeyCode::Char('z' | 'Z') => Self::RotateCounterClockwise,
            KeyCode::Char('p' | 'P') => Self::TogglePause,
            KeyCode::Char('m' | 'M') => Self::ToggleMusic,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(intent)
    }

    /// Returns `true` for intents that still apply while the game is paused.
    pub fn is_live_while_paused(self) -> bool {
        matches!(self, Self::TogglePause | Self::ToggleMusic | Self::Quit)
    }
}
