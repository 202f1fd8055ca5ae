use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player command decoded from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    /// The drop key went down (or repeats while held).
    SpeedHeld,
    /// The drop key was let go. Only seen on terminals reporting key releases.
    SpeedReleased,
    Restart,
    Quit,
}

impl Action {
    #[must_use]
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(event.code, KeyCode::Char('c')).then_some(Self::Quit);
        }

        let is_drop_key = matches!(event.code, KeyCode::Down | KeyCode::Char('s' | 'S'));
        if event.kind == KeyEventKind::Release {
            return is_drop_key.then_some(Self::SpeedReleased);
        }
        if is_drop_key {
            return Some(Self::SpeedHeld);
        }

        let action = match event.code {
            KeyCode::Left | KeyCode::Char('a' | 'A') => Self::MoveLeft,
            KeyCode::Right | KeyCode::Char('d' | 'D') => Self::MoveRight,
            KeyCode::Up | KeyCode::Char(' ') => Self::Rotate,
            KeyCode::Char('r' | 'R') => Self::Restart,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}
