//! Tenant detail pane.

use crate::model::TenantMatch;
use crate::state::StoreState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Shown before any tenant was opened.
pub const EMPTY_HINT: &str = "Press Ctrl+K to search, Enter to open a tenant.";

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Renders the tenant opened from the results panel.
pub struct DetailPane<'a> {
    state: &'a StoreState<TenantMatch>,
    focused: bool,
}

impl<'a> DetailPane<'a> {
    /// Create a pane over a store snapshot.
    pub fn new(state: &'a StoreState<TenantMatch>, focused: bool) -> Self {
        Self { state, focused }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        if self.state.loading {
            return vec![Line::from("Loading tenant...")];
        }
        if let Some(error) = &self.state.error {
            return vec![Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))];
        }
        let Some(tenant) = &self.state.data else {
            return vec![Line::from(Span::styled(
                EMPTY_HINT,
                Style::default().fg(Color::DarkGray),
            ))];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                tenant.display_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            field("Subdomain", &tenant.identifier),
            field("Contact", tenant.contact.as_deref().unwrap_or("-")),
            field("Status", tenant.status.as_deref().unwrap_or("-")),
            field("Plan", tenant.plan_label()),
        ];
        if let Some(at) = self.state.last_updated {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Opened {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        Paragraph::new(self.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Tenant ")
                    .border_style(border),
            )
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
