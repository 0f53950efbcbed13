const MAX_INPUT_LEN: usize = 64;

/// Single-line text field with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    input: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the contents, placing the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.input = value.to_string();
        self.cursor = self.char_len();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.char_len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn insert(&mut self, ch: char) {
        if self.char_len() >= MAX_INPUT_LEN || ch.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut input = TextInput::default();
        for ch in "Kim".chars() {
            input.insert(ch);
        }
        input.move_cursor(-1);
        input.insert('a');
        assert_eq!(input.value(), "Kiam");
        input.backspace();
        input.delete();
        assert_eq!(input.value(), "Ki");
        input.move_home();
        input.insert('>');
        assert_eq!(input.value(), ">Ki");
        input.move_end();
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = TextInput::default();
        input.set("김철수");
        input.move_cursor(-1);
        input.backspace();
        assert_eq!(input.value(), "김수");
        input.insert('영');
        assert_eq!(input.value(), "김영수");
    }

    #[test]
    fn ignores_control_characters_and_caps_length() {
        let mut input = TextInput::default();
        input.insert('\n');
        assert_eq!(input.value(), "");
        for _ in 0..100 {
            input.insert('x');
        }
        assert_eq!(input.value().len(), MAX_INPUT_LEN);
    }
}
