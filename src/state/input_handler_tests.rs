//! Tests for search input editing.

use super::*;

// ===== handle_char_input =====

#[test]
fn typing_appends_at_end() {
    let buffer = InputBuffer::default();
    let buffer = handle_char_input(buffer, 'a');
    let buffer = handle_char_input(buffer, 'c');

    assert_eq!(buffer.text(), "ac");
    assert_eq!(buffer.cursor(), 2);
}

#[test]
fn typing_inserts_at_cursor() {
    let buffer = handle_cursor_left(InputBuffer::new("acme"));
    let buffer = handle_char_input(buffer, 'X');

    assert_eq!(buffer.text(), "acmXe");
    assert_eq!(buffer.cursor(), 4);
}

#[test]
fn typing_after_multibyte_characters() {
    let buffer = InputBuffer::new("café");
    let buffer = handle_cursor_left(buffer);
    let buffer = handle_char_input(buffer, '!');

    assert_eq!(buffer.text(), "caf!é");
}

// ===== handle_backspace / handle_delete =====

#[test]
fn backspace_removes_before_cursor() {
    let buffer = handle_backspace(InputBuffer::new("acme"));
    assert_eq!(buffer.text(), "acm");
    assert_eq!(buffer.cursor(), 3);
}

#[test]
fn backspace_at_start_is_noop() {
    let buffer = handle_home(InputBuffer::new("acme"));
    let buffer = handle_backspace(buffer);
    assert_eq!(buffer.text(), "acme");
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn backspace_removes_whole_multibyte_character() {
    let buffer = handle_backspace(InputBuffer::new("né"));
    assert_eq!(buffer.text(), "n");
}

#[test]
fn delete_removes_under_cursor() {
    let buffer = handle_home(InputBuffer::new("acme"));
    let buffer = handle_delete(buffer);
    assert_eq!(buffer.text(), "cme");
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn delete_at_end_is_noop() {
    let buffer = handle_delete(InputBuffer::new("acme"));
    assert_eq!(buffer.text(), "acme");
}

// ===== cursor movement =====

#[test]
fn cursor_saturates_at_both_ends() {
    let buffer = InputBuffer::new("ab");
    let buffer = handle_cursor_right(buffer);
    assert_eq!(buffer.cursor(), 2);

    let buffer = handle_cursor_left(handle_cursor_left(handle_cursor_left(buffer)));
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn home_and_end() {
    let buffer = handle_home(InputBuffer::new("globex"));
    assert_eq!(buffer.cursor(), 0);
    let buffer = handle_end(buffer);
    assert_eq!(buffer.cursor(), 6);
}
