//! Screen layout.
//!
//! Pure geometry: given the frame area and how many rows the results panel
//! needs, compute where each widget goes. The event loop keeps the last
//! layout around to hit-test mouse clicks.

use super::constants::{
    PANEL_FOOTER_HEIGHT, PLACEHOLDER_HEIGHT, RESULT_ROW_HEIGHT, SEARCH_INPUT_HEIGHT,
    STATUS_BAR_HEIGHT, TOAST_HEIGHT, TOAST_WIDTH,
};
use crate::model::{Panel, PointerTarget};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Where each widget was drawn in the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    /// Search input box.
    pub input: Rect,
    /// Results dropdown, overlaid under the input. `None` while closed.
    pub panel: Option<Rect>,
    /// Tenant detail pane.
    pub detail: Rect,
    /// Status / hint bar.
    pub status: Rect,
}

impl ScreenLayout {
    /// Compute the layout for a frame.
    ///
    /// `panel_rows` is the content height the results panel wants; `None`
    /// when the panel is closed.
    pub fn compute(area: Rect, panel_rows: Option<u16>) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_INPUT_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        let (input, body, status) = (chunks[0], chunks[1], chunks[2]);

        let panel = panel_rows.map(|rows| {
            // borders + footer
            let wanted = rows + PANEL_FOOTER_HEIGHT + 2;
            Rect {
                x: input.x,
                y: body.y,
                width: input.width,
                height: wanted.min(body.height),
            }
        });

        Self {
            input,
            panel,
            detail: body,
            status,
        }
    }

    /// Classify a pointer press at `(column, row)`.
    pub fn hit_test(&self, column: u16, row: u16) -> PointerTarget {
        let position = Position::new(column, row);
        if self.input.contains(position) {
            PointerTarget::Input
        } else if self.panel.is_some_and(|p| p.contains(position)) {
            PointerTarget::Panel
        } else {
            PointerTarget::Outside
        }
    }

    /// Result row under `(column, row)`, if the press landed on one.
    pub fn result_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let panel = self.panel?;
        let inner_top = panel.y + 1;
        let rows_bottom = panel.bottom().saturating_sub(1 + PANEL_FOOTER_HEIGHT);
        if !panel.contains(Position::new(column, row)) || row < inner_top || row >= rows_bottom {
            return None;
        }
        Some(usize::from((row - inner_top) / RESULT_ROW_HEIGHT))
    }
}

/// Content height the results panel needs for `panel`.
pub fn panel_rows(panel: &Panel) -> u16 {
    match panel {
        Panel::Results(results) if !results.is_empty() => {
            let rows = u16::try_from(results.len()).unwrap_or(u16::MAX);
            rows.saturating_mul(RESULT_ROW_HEIGHT)
        }
        _ => PLACEHOLDER_HEIGHT,
    }
}

/// Rects for the toast stack, top-right, newest last.
pub fn toast_areas(area: Rect, count: usize) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.right().saturating_sub(width);
    (0..count)
        .map_while(|i| {
            let offset = u16::try_from(i).ok()?.checked_mul(TOAST_HEIGHT)?;
            let y = area.y.checked_add(offset)?;
            (y + TOAST_HEIGHT <= area.bottom()).then_some(Rect {
                x,
                y,
                width,
                height: TOAST_HEIGHT,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
