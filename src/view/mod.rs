//! TUI rendering and terminal management (impure shell)
//!
//! Owns the terminal, the lookup worker and the wall clock. Everything else
//! is delegated to the pure state in [`crate::state`]: key presses become
//! input edits or controller calls, the controller hands back tickets that
//! are queued on the worker, and finished lookups are fed back through
//! `SearchController::complete`.

pub mod constants;
mod detail;
mod layout;
mod results;
mod search_input;
mod toast;

pub use detail::DetailPane;
pub use layout::ScreenLayout;
pub use results::ResultsPanel;
pub use search_input::SearchInput;
pub use toast::render_toasts;

use crate::config::KeyBindings;
use crate::export::{default_file_name, export_to, ExportFormat};
use crate::model::{
    Completion, ExportError, FailureReason, KeyAction, KeyChord, Panel, PointerTarget,
    QueryTicket, SearchKey, TenantMatch,
};
use crate::provider::{LookupResult, LookupWorker, SearchProvider};
use crate::state::input_handler::{
    handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right, handle_delete,
    handle_end, handle_home,
};
use crate::state::{
    ControllerConfig, InputBuffer, Notifier, ResultStore, SearchController, Severity,
};
use constants::IDLE_POLL_INTERVAL_MS;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Poll interval while a lookup is outstanding, so results show promptly.
const LOADING_POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The lookup worker thread could not be started
    #[error("Failed to start lookup worker: {0}")]
    WorkerSpawn(#[source] io::Error),
}

/// Which pane receives plain key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The search input.
    Search,
    /// The tenant detail pane.
    Detail,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    controller: SearchController,
    input: InputBuffer,
    focus: Focus,
    worker: LookupWorker,
    detail: ResultStore<TenantMatch>,
    notifier: Notifier,
    key_bindings: KeyBindings,
    export_dir: PathBuf,
    source_label: String,
    /// Last rendered layout (for mouse hit-testing)
    layout: ScreenLayout,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(worker: LookupWorker, options: AppOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, worker, options))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C / Ctrl+Q). Sleeps until the next
    /// terminal event, debounce deadline or lookup timeout.
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            let now = Instant::now();
            self.service(now);
            self.draw(now)?;

            if event::poll(self.poll_timeout(now))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key, Instant::now()) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    // next draw picks up the new size
                    Event::Resize(..) => {}
                    _ => {}
                }
            }
        }
    }
}

/// Host settings for [`TuiApp`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Controller tunables.
    pub controller: ControllerConfig,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    /// Where tenants come from, shown in the status bar.
    pub source_label: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            export_dir: PathBuf::from("."),
            source_label: String::new(),
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    fn with_terminal(terminal: Terminal<B>, worker: LookupWorker, options: AppOptions) -> Self {
        Self {
            terminal,
            controller: SearchController::new(options.controller),
            input: InputBuffer::default(),
            focus: Focus::Search,
            worker,
            detail: ResultStore::new(),
            notifier: Notifier::new(),
            key_bindings: KeyBindings::default(),
            export_dir: options.export_dir,
            source_label: options.source_label,
            layout: ScreenLayout::default(),
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        let idle = Duration::from_millis(IDLE_POLL_INTERVAL_MS);
        let base = if self.controller.is_loading() {
            LOADING_POLL_INTERVAL
        } else {
            idle
        };
        self.controller
            .next_wakeup(now)
            .map_or(base, |wakeup| wakeup.min(base))
    }

    // ===== Timers and lookups =====

    /// Fire due timers, queue new lookups, apply finished ones and expire
    /// toasts.
    fn service(&mut self, now: Instant) {
        let was_loading = self.controller.is_loading();
        if let Some(ticket) = self.controller.tick(now) {
            self.dispatch(ticket, now);
        }
        if was_loading && self.timed_out() {
            self.notifier
                .push(Severity::Warning, "Search timed out. Try again.", now);
        }

        for result in self.worker.drain() {
            self.apply(result, now);
        }
        self.notifier.prune(now);
    }

    fn timed_out(&self) -> bool {
        matches!(
            self.controller.panel(),
            Some(Panel::Failed {
                reason: FailureReason::TimedOut,
                ..
            })
        )
    }

    fn dispatch(&mut self, ticket: QueryTicket, now: Instant) {
        if let Err(failed) = self.worker.submit(ticket) {
            warn!("lookup worker is gone");
            self.apply(failed, now);
        }
    }

    fn apply(&mut self, result: LookupResult, now: Instant) {
        let message = result.outcome.as_ref().err().map(ToString::to_string);
        if self.controller.complete(result.ticket, result.outcome) == Completion::Failed {
            let message = message.unwrap_or_default();
            self.notifier
                .push(Severity::Error, format!("Search failed: {message}"), now);
        }
    }

    // ===== Keyboard =====

    /// Handle a key press. Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if let Some(action) = self.key_bindings.get(key) {
            return self.handle_action(action, key, now);
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key, now),
            Focus::Detail => self.handle_detail_key(key, now),
        }
        false
    }

    fn handle_action(&mut self, action: KeyAction, key: KeyEvent, now: Instant) -> bool {
        debug!(?action, "key action");
        match action {
            KeyAction::FocusSearch => {
                let outcome = self.controller.on_global_key(chord_for(key));
                if outcome.focus_input {
                    self.focus_search();
                }
            }
            KeyAction::ClearSearch => {
                self.controller.clear();
                self.input = InputBuffer::default();
            }
            KeyAction::ExportCsv => self.export(ExportFormat::Csv, now),
            KeyAction::ExportJson => self.export(ExportFormat::Json, now),
            KeyAction::DismissNotifications => self.notifier.clear(),
            KeyAction::Quit => return true,
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit(|buffer| handle_char_input(buffer, c), now);
            }
            KeyCode::Backspace => self.edit(handle_backspace, now),
            KeyCode::Delete => self.edit(handle_delete, now),
            KeyCode::Left => self.input = handle_cursor_left(std::mem::take(&mut self.input)),
            KeyCode::Right => self.input = handle_cursor_right(std::mem::take(&mut self.input)),
            KeyCode::Home => self.input = handle_home(std::mem::take(&mut self.input)),
            KeyCode::End => self.input = handle_end(std::mem::take(&mut self.input)),
            KeyCode::Down => {
                self.controller.on_key(SearchKey::ArrowDown);
            }
            KeyCode::Up => {
                self.controller.on_key(SearchKey::ArrowUp);
            }
            KeyCode::Enter => {
                if let Some(tenant) = self.controller.on_key(SearchKey::Enter) {
                    self.open_tenant(tenant);
                }
            }
            KeyCode::Esc => {
                self.controller.on_global_key(KeyChord::escape());
            }
            KeyCode::Tab => self.focus = Focus::Detail,
            _ => {
                self.controller.on_key(SearchKey::Other);
            }
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.focus_search(),
            KeyCode::Esc => {
                self.controller.on_global_key(KeyChord::escape());
            }
            // typing anywhere goes to the search box
            KeyCode::Char(_) => {
                self.focus_search();
                self.handle_search_key(key, now);
            }
            _ => {}
        }
    }

    fn edit(&mut self, f: impl FnOnce(InputBuffer) -> InputBuffer, now: Instant) {
        let before = self.input.text().to_string();
        self.input = f(std::mem::take(&mut self.input));
        if self.input.text() != before {
            self.controller.on_input(self.input.text(), now);
        }
    }

    fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.controller.on_focus();
    }

    // ===== Mouse =====

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let target = self.layout.hit_test(mouse.column, mouse.row);
        match target {
            PointerTarget::Input => self.focus_search(),
            PointerTarget::Panel => {
                let picked = self
                    .layout
                    .result_row_at(mouse.column, mouse.row)
                    .and_then(|row| self.controller.panel()?.matches().get(row).cloned());
                if let Some(tenant) = picked {
                    self.controller.close();
                    self.open_tenant(tenant);
                }
            }
            PointerTarget::Outside => {
                self.controller.on_pointer(target);
                self.focus = Focus::Detail;
            }
        }
    }

    // ===== Actions =====

    fn open_tenant(&mut self, tenant: TenantMatch) {
        info!(identifier = tenant.identifier.as_str(), "opening tenant");
        self.detail.start_loading();
        self.detail.finish(Ok(tenant));
        self.focus = Focus::Detail;
    }

    fn export(&mut self, format: ExportFormat, now: Instant) {
        let records = self
            .controller
            .panel()
            .map(Panel::matches)
            .unwrap_or_default();
        let path = self.export_dir.join(default_file_name(
            "tenants",
            format,
            chrono::Utc::now(),
        ));

        match export_to(&path, format, records) {
            Ok(count) => {
                self.notifier.push(
                    Severity::Success,
                    format!("Exported {count} tenants to {}", path.display()),
                    now,
                );
            }
            Err(ExportError::Empty) => {
                self.notifier
                    .push(Severity::Warning, "No results to export", now);
            }
            Err(err) => {
                warn!(%err, "export failed");
                self.notifier.push(Severity::Error, err.to_string(), now);
            }
        }
    }

    // ===== Rendering =====

    fn draw(&mut self, now: Instant) -> Result<(), TuiError> {
        let panel = self
            .controller
            .panel()
            .filter(|_| self.controller.is_open());
        let panel_rows = panel.map(layout::panel_rows);
        let mut screen = self.layout;

        self.terminal.draw(|frame| {
            screen = ScreenLayout::compute(frame.area(), panel_rows);

            frame.render_widget(
                DetailPane::new(self.detail.state(), self.focus == Focus::Detail),
                screen.detail,
            );
            frame.render_widget(
                SearchInput::new(&self.input, self.focus == Focus::Search)
                    .loading(self.controller.is_loading()),
                screen.input,
            );
            frame.render_widget(status_line(&self.source_label), screen.status);

            if let (Some(panel), Some(area)) = (panel, screen.panel) {
                frame.render_widget(
                    ResultsPanel::new(panel, self.controller.selection()),
                    area,
                );
            }

            render_toasts(frame, self.notifier.visible(), now);
        })?;

        self.layout = screen;
        Ok(())
    }
}

fn chord_for(key: KeyEvent) -> KeyChord {
    let key_char = match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    };
    KeyChord {
        key: key_char,
        escape: key.code == KeyCode::Esc,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        meta: key
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
    }
}

fn status_line(source_label: &str) -> Paragraph<'_> {
    let hint = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    if !source_label.is_empty() {
        spans.push(Span::styled(source_label, Style::default().fg(Color::Gray)));
        spans.push(Span::styled("  ", hint));
    }
    spans.push(Span::styled(
        "^K search  ^E csv  ^J json  ^L clear  ^N dismiss  ^C quit",
        hint,
    ));
    Paragraph::new(Line::from(spans))
}

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app around an arbitrary backend without touching the real
    /// terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        worker: LookupWorker,
        options: AppOptions,
    ) -> Self {
        Self::with_terminal(terminal, worker, options)
    }

    /// Block until the worker answers, then apply the result.
    pub(crate) fn await_lookup(&mut self, timeout: Duration, now: Instant) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(result) => {
                self.apply(result, now);
                true
            }
            None => false,
        }
    }
}

/// Initialize and run the TUI application with a lookup provider
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_provider<P>(provider: P, options: AppOptions) -> Result<(), TuiError>
where
    P: SearchProvider + 'static,
{
    let worker = LookupWorker::spawn(provider).map_err(TuiError::WorkerSpawn)?;
    let mut app = TuiApp::new(worker, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
