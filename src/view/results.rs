//! Results dropdown widget.
//!
//! Renders the controller's [`Panel`]: a placeholder while loading, when
//! nothing matched or when the lookup failed, otherwise one two-line row per
//! match with the query highlighted.

use crate::model::{FailureReason, Panel, TenantMatch};
use crate::state::highlight;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Placeholder while a lookup is outstanding.
pub const LOADING_TEXT: &str = "Searching...";
/// Placeholder when the lookup returned nothing.
pub const EMPTY_TEXT: &str = "No tenants found. Try another search term.";
/// Placeholder when the lookup failed.
pub const FAILED_TEXT: &str = "Search failed";
/// Hint footer.
pub const FOOTER_TEXT: &str = "↑↓ navigate · Enter open · Esc close";

fn emphasis() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn status_color(status: Option<&str>) -> Color {
    match status {
        Some("active") => Color::Green,
        Some("suspended") => Color::Red,
        _ => Color::Yellow,
    }
}

/// Spans for `text` with every occurrence of `query` emphasized.
pub fn highlighted_spans<'a>(text: &'a str, query: &str, base: Style) -> Vec<Span<'a>> {
    highlight(text, query)
        .into_iter()
        .map(|segment| {
            if segment.emphasized {
                Span::styled(segment.text, base.patch(emphasis()))
            } else {
                Span::styled(segment.text, base)
            }
        })
        .collect()
}

/// Results panel widget.
pub struct ResultsPanel<'a> {
    panel: &'a Panel,
    selected: Option<usize>,
}

impl<'a> ResultsPanel<'a> {
    /// Create a widget for `panel` with `selected` highlighted.
    pub fn new(panel: &'a Panel, selected: Option<usize>) -> Self {
        Self { panel, selected }
    }

    fn title(&self) -> String {
        match self.panel {
            Panel::Results(results) if !results.is_empty() => {
                format!(" Tenants ({}) ", results.len())
            }
            _ => " Tenants ".to_string(),
        }
    }

    fn body(&self) -> Vec<Line<'a>> {
        match self.panel {
            Panel::Loading { .. } => vec![Line::from(Span::styled(
                LOADING_TEXT,
                Style::default().fg(Color::Gray),
            ))],
            Panel::Failed { reason, .. } => {
                let detail = match reason {
                    FailureReason::TimedOut => "timed out".to_string(),
                    FailureReason::Provider(message) => message.clone(),
                };
                vec![Line::from(vec![
                    Span::styled(FAILED_TEXT, Style::default().fg(Color::Red)),
                    Span::styled(format!(" ({detail})"), Style::default().fg(Color::DarkGray)),
                ])]
            }
            Panel::Results(results) if results.is_empty() => vec![Line::from(Span::styled(
                EMPTY_TEXT,
                Style::default().fg(Color::Gray),
            ))],
            Panel::Results(results) => {
                let query = results.query().as_str();
                results
                    .matches()
                    .iter()
                    .enumerate()
                    .flat_map(|(i, tenant)| row(tenant, query, self.selected == Some(i)))
                    .collect()
            }
        }
    }
}

fn row<'a>(tenant: &'a TenantMatch, query: &str, selected: bool) -> [Line<'a>; 2] {
    let base = if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let mut name = vec![
        Span::styled(
            format!(" {} ", tenant.initial()),
            base.fg(Color::White).bg(Color::Blue),
        ),
        Span::styled(" ", base),
    ];
    name.extend(highlighted_spans(&tenant.display_name, query, base));
    name.push(Span::styled(" ● ", base.fg(status_color(tenant.status.as_deref()))));
    name.push(Span::styled(tenant.plan_label(), base.fg(Color::DarkGray)));

    let secondary = base.fg(Color::Gray);
    let mut detail = vec![Span::styled("    ", secondary)];
    detail.extend(highlighted_spans(&tenant.identifier, query, secondary));
    if let Some(contact) = tenant.contact.as_deref() {
        detail.push(Span::styled(" • ", secondary));
        detail.extend(highlighted_spans(contact, query, secondary));
    }

    [Line::from(name), Line::from(detail)]
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        Paragraph::new(self.body()).render(chunks[0], buf);
        Paragraph::new(Line::from(Span::styled(
            FOOTER_TEXT,
            Style::default().fg(Color::DarkGray),
        )))
        .render(chunks[1], buf);
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
