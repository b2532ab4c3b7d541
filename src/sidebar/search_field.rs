//! Search input text and focus.

/// An edit applied to the search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Search input: query text, cursor (in characters) and focus flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchField {
    query: String,
    cursor: usize,
    focused: bool,
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Focus the field, placing the cursor at the end of the text.
    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = self.char_len();
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Empty the text and drop focus.
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.focused = false;
    }

    /// Replace the whole text, cursor at the end.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.cursor = self.char_len();
    }

    /// Apply an edit. Returns true if the text changed.
    pub fn apply(&mut self, edit: QueryEdit) -> bool {
        match edit {
            QueryEdit::Insert(c) => {
                let at = self.byte_offset(self.cursor);
                self.query.insert(at, c);
                self.cursor += 1;
                true
            }
            QueryEdit::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.query.remove(at);
                true
            }
            QueryEdit::Delete => {
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.query.remove(at);
                true
            }
            QueryEdit::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            QueryEdit::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            QueryEdit::Home => {
                self.cursor = 0;
                false
            }
            QueryEdit::End => {
                self.cursor = self.char_len();
                false
            }
        }
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map_or(self.query.len(), |(i, _)| i)
    }
}
