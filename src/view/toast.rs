//! Toast notifications overlay.

use super::layout::toast_areas;
use crate::state::{Severity, Toast};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

/// Draw visible toasts stacked in the top-right corner. Toasts that don't
/// fit on screen are skipped.
pub fn render_toasts(frame: &mut Frame, toasts: &[Toast], now: Instant) {
    let areas = toast_areas(frame.area(), toasts.len());
    for (toast, area) in toasts.iter().zip(areas) {
        let color = severity_color(toast.severity);
        // the border fades to gray once most of the lifetime is gone
        let border = if toast.remaining_fraction(now) < 0.25 {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(color)
        };

        let body = Paragraph::new(vec![Line::from(Span::raw(toast.message.as_str()))])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(Span::styled(
                        format!(" {} ", toast.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(body, area);
    }
}
