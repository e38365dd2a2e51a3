use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key together with the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Binding matching a terminal key event. Shift is dropped for characters
    /// since it is already part of the character itself.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self {
            code: event.code,
            modifiers,
        }
    }

    /// Short label for the help line, e.g. `^Z` or `Enter`
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("^{}", key.to_uppercase())
        } else {
            key
        }
    }
}

/// Subscriptions represent inputs that an app wants to receive.
/// They are registered via the subscriptions() function.
pub enum Subscription<Msg> {
    /// Subscribe to a specific key
    Keyboard {
        binding: KeyBinding,
        msg: Msg,
        description: String,
    },
}

impl<Msg> Subscription<Msg> {
    /// Helper to create a keyboard subscription without modifiers
    pub fn keyboard(key: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Self::binding(KeyBinding::plain(key), description, msg)
    }

    /// Helper to create a Ctrl+<c> subscription
    pub fn ctrl(c: char, description: impl Into<String>, msg: Msg) -> Self {
        Self::binding(KeyBinding::ctrl(c), description, msg)
    }

    pub fn binding(binding: KeyBinding, description: impl Into<String>, msg: Msg) -> Self {
        Subscription::Keyboard {
            binding,
            msg,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    #[test]
    fn test_shift_is_ignored_for_characters() {
        let event = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(KeyBinding::from_event(&event), KeyBinding::plain(KeyCode::Char('T')));
        assert_eq!(event.kind, KeyEventKind::Press);
    }

    #[test]
    fn test_labels() {
        assert_eq!(KeyBinding::ctrl('z').label(), "^Z");
        assert_eq!(KeyBinding::plain(KeyCode::Enter).label(), "Enter");
        assert_eq!(KeyBinding::plain(KeyCode::Char('a')).label(), "a");
    }
}
