//! Text buffer with a byte-offset cursor.

use super::layout::{next_char_boundary, prev_char_boundary};

#[derive(Debug, Default)]
pub(super) struct LineEditor {
    text: String,
    /// Byte offset, always on a char boundary (0..=text.len())
    cursor: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// Replace the whole buffer, leaving the cursor at the end.
    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn insert(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = next_char_boundary(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    pub fn left(&mut self) -> bool {
        self.move_to(prev_char_boundary(&self.text, self.cursor))
    }

    pub fn right(&mut self) -> bool {
        self.move_to(next_char_boundary(&self.text, self.cursor))
    }

    /// Start of the current logical line.
    pub fn home(&mut self) -> bool {
        let start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.move_to(start)
    }

    /// End of the current logical line.
    pub fn end(&mut self) -> bool {
        let end = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
        self.move_to(end)
    }

    fn move_to(&mut self, pos: usize) -> bool {
        let moved = pos != self.cursor;
        self.cursor = pos;
        moved
    }
}
