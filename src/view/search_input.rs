//! Search input widget for rendering the search bar.

use crate::state::InputBuffer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown while the input is empty.
pub const PLACEHOLDER: &str = "Search tenants... (Ctrl+K)";

/// Search input widget.
///
/// Draws the cursor only while focused.
pub struct SearchInput<'a> {
    buffer: &'a InputBuffer,
    focused: bool,
    loading: bool,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(buffer: &'a InputBuffer, focused: bool) -> Self {
        Self {
            buffer,
            focused,
            loading: false,
        }
    }

    /// Show a spinner-style marker in the title while a lookup runs.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn line(&self) -> Line<'a> {
        let text = self.buffer.text();

        if text.is_empty() && !self.focused {
            return Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ));
        }

        if !self.focused {
            return Line::from(text);
        }

        let cursor = self.buffer.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let under = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(
                under,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.loading { " Search … " } else { " Search " };
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        Paragraph::new(self.line())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::input_handler::handle_cursor_left;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(buffer: &InputBuffer, focused: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchInput::new(buffer, focused), frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..40u16).map(|x| buf[(x, 1u16)].symbol().to_string()).collect()
    }

    #[test]
    fn unfocused_empty_input_shows_placeholder() {
        let row = render(&InputBuffer::default(), false);
        assert!(row.contains("Search tenants"), "got {row:?}");
    }

    #[test]
    fn focused_input_shows_text() {
        let row = render(&InputBuffer::new("acme"), true);
        assert!(row.contains("acme"), "got {row:?}");
    }

    #[test]
    fn cursor_cell_is_highlighted() {
        let buffer = handle_cursor_left(InputBuffer::new("ab"));
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchInput::new(&buffer, true), frame.area()))
            .unwrap();
        // border at x=0, 'a' at x=1, cursor on 'b' at x=2
        let cell = &terminal.backend().buffer()[(2u16, 1u16)];
        assert_eq!(cell.symbol(), "b");
        assert_eq!(cell.bg, Color::White);
    }
}
