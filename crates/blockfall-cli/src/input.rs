use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player intents understood by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Rotate,
    /// One tick, immediately.
    SoftDrop,
    /// Hard drop followed by one tick.
    HardDrop,
    Quit,
}

/// Keys shown in the key-binding line, in display order.
pub const KEY_BINDINGS: &[(&[&str], &str)] = &[
    (&["←", "a"], "Left"),
    (&["→", "d"], "Right"),
    (&["↑", "w", "x"], "Rotate"),
    (&["↓", "s"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["q", "Esc"], "Quit"),
];

impl Intent {
    /// Maps a terminal event to an intent. Key releases and unbound keys map to `None`.
    pub fn from_event(event: &Event) -> Option<Self> {
        Self::from_key_event(event.as_key_event()?)
    }

    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(Self::Quit);
        }
        let intent = match key.code {
            KeyCode::Left | KeyCode::Char('a' | 'A') => Self::MoveLeft,
            KeyCode::Right | KeyCode::Char('d' | 'D') => Self::MoveRight,
            KeyCode::Up | KeyCode::Char('w' | 'W' | 'x' | 'X') => Self::Rotate,
            KeyCode::Down | KeyCode::Char('s' | 'S') => Self::SoftDrop,
            KeyCode::Char(' ') => Self::HardDrop,
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Self::Quit,
            _ => return None,
        };
        Some(intent)
    }
}
