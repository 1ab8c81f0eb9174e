//! Search input editing (pure state transitions).
//!
//! Text editing is kept apart from the controller: these functions only
//! move characters and the cursor. The caller forwards the resulting text
//! to `SearchController::on_input`.

/// Text of the search box plus a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    /// Buffer holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Insert a character at the cursor and advance it.
pub fn handle_char_input(mut buffer: InputBuffer, ch: char) -> InputBuffer {
    let at = buffer.byte_offset(buffer.cursor);
    buffer.text.insert(at, ch);
    buffer.cursor += 1;
    buffer
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut buffer: InputBuffer) -> InputBuffer {
    if buffer.cursor == 0 {
        return buffer;
    }
    let at = buffer.byte_offset(buffer.cursor - 1);
    buffer.text.remove(at);
    buffer.cursor -= 1;
    buffer
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut buffer: InputBuffer) -> InputBuffer {
    if buffer.cursor >= buffer.char_len() {
        return buffer;
    }
    let at = buffer.byte_offset(buffer.cursor);
    buffer.text.remove(at);
    buffer
}

/// Move cursor left, saturating at 0.
pub fn handle_cursor_left(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = buffer.cursor.saturating_sub(1);
    buffer
}

/// Move cursor right, saturating at the text length.
pub fn handle_cursor_right(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = (buffer.cursor + 1).min(buffer.char_len());
    buffer
}

/// Jump to the start of the text.
pub fn handle_home(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = 0;
    buffer
}

/// Jump to the end of the text.
pub fn handle_end(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = buffer.char_len();
    buffer
}

// ===== Tests =====

#[cfg(test)]
#[path = "input_handler_tests.rs"]
mod tests;
