use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line input buffer with a cursor counted in grapheme clusters.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        LineBuffer::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Display width of everything left of the cursor.
    pub fn cursor_width(&self) -> usize {
        self.text[..self.byte_index(self.cursor)].width()
    }

    /// Replaces the contents and puts the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        // `c` may merge with its neighbours (combining marks, ZWJ), so land
        // after whichever cluster now holds it
        let after = byte_idx + c.len_utf8();
        self.cursor = self
            .text
            .grapheme_indices(true)
            .take_while(|&(i, _)| i < after)
            .count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub fn delete(&mut self) {
        self.remove_at_cursor();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    pub fn move_word_left(&mut self) {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        let mut pos = self.cursor;

        while pos > 0 && is_blank(graphemes[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !is_blank(graphemes[pos - 1]) {
            pos -= 1;
        }

        self.cursor = pos;
    }

    pub fn move_word_right(&mut self) {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        let len = graphemes.len();
        let mut pos = self.cursor;

        while pos < len && !is_blank(graphemes[pos]) {
            pos += 1;
        }
        while pos < len && is_blank(graphemes[pos]) {
            pos += 1;
        }

        self.cursor = pos;
    }

    fn remove_at_cursor(&mut self) {
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.drain(start..end);
    }

    fn byte_index(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}
