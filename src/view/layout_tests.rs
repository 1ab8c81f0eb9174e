//! Tests for screen layout and hit-testing.

use super::*;
use crate::model::{ResultSet, SearchQuery, TenantMatch};

fn area() -> Rect {
    Rect::new(0, 0, 80, 24)
}

fn results(n: usize) -> Panel {
    let query = SearchQuery::new("ac").unwrap();
    let matches = (0..n)
        .map(|i| TenantMatch::new(format!("Acme {i}"), format!("acme{i}")))
        .collect();
    Panel::Results(ResultSet::new(query, matches))
}

#[test]
fn closed_panel_has_no_rect() {
    let layout = ScreenLayout::compute(area(), None);
    assert_eq!(layout.panel, None);
    assert_eq!(layout.input.height, SEARCH_INPUT_HEIGHT);
    assert_eq!(layout.status.y, 23);
}

#[test]
fn panel_sits_directly_under_input() {
    let layout = ScreenLayout::compute(area(), Some(4));
    let panel = layout.panel.unwrap();
    assert_eq!(panel.y, layout.input.bottom());
    // 4 rows + footer + 2 borders
    assert_eq!(panel.height, 7);
}

#[test]
fn panel_is_clamped_to_body_height() {
    let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 8), Some(40));
    let panel = layout.panel.unwrap();
    assert!(panel.bottom() <= layout.status.y);
}

#[test]
fn hit_test_classifies_regions() {
    let layout = ScreenLayout::compute(area(), Some(4));
    assert_eq!(layout.hit_test(5, 1), PointerTarget::Input);
    assert_eq!(layout.hit_test(5, 4), PointerTarget::Panel);
    assert_eq!(layout.hit_test(5, 20), PointerTarget::Outside);
}

#[test]
fn hit_test_without_panel_treats_body_as_outside() {
    let layout = ScreenLayout::compute(area(), None);
    assert_eq!(layout.hit_test(5, 4), PointerTarget::Outside);
}

#[test]
fn result_row_at_maps_lines_to_rows() {
    let layout = ScreenLayout::compute(area(), Some(panel_rows(&results(3))));
    let top = layout.panel.unwrap().y + 1;
    assert_eq!(layout.result_row_at(5, top), Some(0));
    assert_eq!(layout.result_row_at(5, top + 1), Some(0));
    assert_eq!(layout.result_row_at(5, top + 2), Some(1));
    assert_eq!(layout.result_row_at(5, top + 5), Some(2));
    // border and footer are not rows
    assert_eq!(layout.result_row_at(5, top - 1), None);
    assert_eq!(layout.result_row_at(5, top + 6), None);
}

#[test]
fn panel_rows_uses_placeholder_height_for_empty_and_loading() {
    let query = SearchQuery::new("ac").unwrap();
    assert_eq!(panel_rows(&Panel::Loading { query }), PLACEHOLDER_HEIGHT);
    assert_eq!(panel_rows(&results(0)), PLACEHOLDER_HEIGHT);
    assert_eq!(panel_rows(&results(5)), 5 * RESULT_ROW_HEIGHT);
}

#[test]
fn toast_areas_stack_from_top_right() {
    let rects = toast_areas(area(), 2);
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].right(), 80);
    assert_eq!(rects[1].y, rects[0].bottom());
}

#[test]
fn toast_areas_stop_at_screen_bottom() {
    let rects = toast_areas(Rect::new(0, 0, 80, 10), 5);
    assert_eq!(rects.len(), 2);
}
