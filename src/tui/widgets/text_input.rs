use crossterm::event::KeyCode;

/// Manages text input cursor state
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize, // Character index (0 = before first char)
}

impl TextInputState {
    /// Create a new TextInputState with cursor at start
    pub fn new() -> Self {
        Self { cursor_pos: 0 }
    }

    /// Get current cursor position
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Set cursor position to the end of the given text
    pub fn set_cursor_to_end(&mut self, text: &str) {
        self.cursor_pos = text.chars().count();
    }

    /// Handle a key press and update text value
    /// Returns Some(new_value) if text changed, None if only cursor moved
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str, max_length: Option<usize>) -> Option<String> {
        let char_count = current_value.chars().count();
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                if max_length.is_some_and(|max| char_count >= max) {
                    return None;
                }

                let mut chars: Vec<char> = current_value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace => {
                // Delete character before cursor
                if self.cursor_pos == 0 {
                    return None;
                }
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos - 1);
                self.cursor_pos -= 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Delete => {
                // Delete character at cursor position
                if self.cursor_pos >= char_count {
                    return None;
                }
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.remove(self.cursor_pos);
                Some(chars.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(char_count);
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }

    /// Split `text` around the cursor: (before, character under cursor, after)
    pub fn split<'a>(&self, text: &'a str) -> (&'a str, Option<char>, &'a str) {
        let byte_pos = text
            .char_indices()
            .nth(self.cursor_pos)
            .map_or(text.len(), |(idx, _)| idx);
        let (before, rest) = text.split_at(byte_pos);
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_deleting() {
        let mut input = TextInputState::new();
        let value = input.handle_key(KeyCode::Char('h'), "", None).unwrap();
        let value = input.handle_key(KeyCode::Char('i'), &value, None).unwrap();
        assert_eq!(value, "hi");

        assert_eq!(input.handle_key(KeyCode::Left, &value, None), None);
        let value = input.handle_key(KeyCode::Backspace, &value, None).unwrap();
        assert_eq!(value, "i");
        assert_eq!(input.cursor_pos(), 0);
        assert_eq!(input.handle_key(KeyCode::Backspace, &value, None), None);
    }

    #[test]
    fn test_max_length_blocks_insertion() {
        let mut input = TextInputState::new();
        input.set_cursor_to_end("abc");
        assert_eq!(input.handle_key(KeyCode::Char('d'), "abc", Some(3)), None);
    }

    #[test]
    fn test_split_handles_multibyte_text() {
        let mut input = TextInputState::new();
        input.set_cursor_to_end("Questão");
        assert_eq!(input.split("Questão"), ("Questão", None, ""));

        input.handle_key(KeyCode::Left, "Questão", None);
        input.handle_key(KeyCode::Left, "Questão", None);
        assert_eq!(input.split("Questão"), ("Quest", Some('ã'), "o"));
    }
}
