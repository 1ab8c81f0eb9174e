//! Layout dimension constants for TUI rendering.

/// Height of the search input widget in lines (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines reserved inside the results panel for the keyboard hint footer.
pub const PANEL_FOOTER_HEIGHT: u16 = 1;

/// Lines each result row takes (name line + identifier line).
pub const RESULT_ROW_HEIGHT: u16 = 2;

/// Height of the results panel when it shows a placeholder instead of rows.
pub const PLACEHOLDER_HEIGHT: u16 = 1;

/// Width of one toast, in columns.
pub const TOAST_WIDTH: u16 = 44;

/// Height of one toast, in lines (border + title + message).
pub const TOAST_HEIGHT: u16 = 4;

/// Poll interval while nothing is scheduled; keeps toasts expiring on time.
pub const IDLE_POLL_INTERVAL_MS: u64 = 250;
