//! Event-loop level tests: key and mouse routing through the controller,
//! the worker round trip, exports and toasts.

use super::*;
use crate::model::{ProviderError, SearchQuery};
use crate::provider::DirectoryProvider;
use crate::state::debounce::DEFAULT_DEBOUNCE;
use ratatui::backend::TestBackend;
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

struct FailingProvider;

impl SearchProvider for FailingProvider {
    fn search(&self, _query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError> {
        Err(ProviderError::SessionExpired)
    }
}

/// Answers only after a delay, so the lookup is still in flight when the
/// test moves the clock.
struct SlowProvider(Duration);

impl SearchProvider for SlowProvider {
    fn search(&self, _query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError> {
        std::thread::sleep(self.0);
        Ok(Vec::new())
    }
}

fn tenants() -> Vec<TenantMatch> {
    vec![
        TenantMatch::new("Acme Corp", "acme").with_contact("ops@acme.io"),
        TenantMatch::new("Acme Labs", "acme-labs"),
        TenantMatch::new("Globex", "globex"),
    ]
}

fn app_with<P: SearchProvider + 'static>(provider: P, export_dir: PathBuf) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let worker = LookupWorker::spawn(provider).unwrap();
    TuiApp::new_for_test(
        terminal,
        worker,
        AppOptions {
            export_dir,
            source_label: "3 tenants".to_string(),
            ..AppOptions::default()
        },
    )
}

fn app() -> TuiApp<TestBackend> {
    app_with(DirectoryProvider::new(tenants()), PathBuf::from("."))
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut TuiApp<TestBackend>, text: &str, now: Instant) {
    for c in text.chars() {
        assert!(!app.handle_key(press(KeyCode::Char(c)), now));
    }
}

/// Type `text`, let the debounce fire and wait for the worker's answer.
fn search(app: &mut TuiApp<TestBackend>, text: &str, now: Instant) -> Instant {
    type_text(app, text, now);
    let later = now + DEFAULT_DEBOUNCE;
    app.service(later);
    // a fast worker may already have been drained by `service`
    if app.controller.is_loading() {
        assert!(app.await_lookup(WAIT, later), "worker did not answer");
    }
    assert!(!app.controller.is_loading());
    later
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    let buf = app.terminal.backend().buffer();
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// ===== Keyboard =====

#[test]
fn ctrl_c_quits() {
    let mut app = app();
    assert!(app.handle_key(ctrl('c'), Instant::now()));
}

#[test]
fn plain_q_is_typed_not_quit() {
    let mut app = app();
    assert!(!app.handle_key(press(KeyCode::Char('q')), Instant::now()));
    assert_eq!(app.input.text(), "q");
    assert_eq!(app.controller.input(), "q");
}

#[test]
fn typing_waits_for_debounce_before_lookup() {
    let mut app = app();
    let now = Instant::now();
    type_text(&mut app, "ac", now);

    app.service(now + DEFAULT_DEBOUNCE / 2);
    assert!(!app.controller.is_loading());
    assert!(app.controller.has_pending_input());

    app.service(now + DEFAULT_DEBOUNCE);
    assert!(!app.controller.has_pending_input());
    assert_eq!(app.controller.generation(), 1);
}

#[test]
fn lookup_round_trip_renders_results() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    assert!(app.controller.is_open());
    assert_eq!(app.controller.panel().unwrap().matches().len(), 2);

    app.draw(now).unwrap();
    let text = screen(&app);
    assert!(text.contains("Tenants (2)"), "{text}");
    assert!(text.contains("Acme Labs"), "{text}");
    assert!(text.contains("3 tenants"), "{text}");
}

#[test]
fn arrow_down_and_enter_open_detail_pane() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(press(KeyCode::Down), now);
    app.handle_key(press(KeyCode::Down), now);
    assert_eq!(app.controller.selection(), Some(1));

    app.handle_key(press(KeyCode::Enter), now);
    assert!(!app.controller.is_open());
    assert_eq!(app.focus, Focus::Detail);
    assert_eq!(
        app.detail.data().map(|t| t.identifier.as_str()),
        Some("acme-labs")
    );
    assert!(app.detail.state().last_updated.is_some());

    app.draw(now).unwrap();
    assert!(screen(&app).contains("Subdomain acme-labs"));
}

#[test]
fn enter_without_selection_keeps_panel_open() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(press(KeyCode::Enter), now);
    assert!(app.controller.is_open());
    assert!(app.detail.data().is_none());
}

#[test]
fn escape_closes_panel_and_keeps_text() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(press(KeyCode::Esc), now);
    assert!(!app.controller.is_open());
    assert_eq!(app.input.text(), "acme");
}

#[test]
fn ctrl_k_from_detail_refocuses_and_reopens() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());
    app.handle_key(press(KeyCode::Esc), now);
    app.handle_key(press(KeyCode::Tab), now);
    assert_eq!(app.focus, Focus::Detail);

    app.handle_key(ctrl('k'), now);
    assert_eq!(app.focus, Focus::Search);
    assert!(app.controller.is_open());
}

#[test]
fn typing_in_detail_pane_goes_to_search() {
    let mut app = app();
    app.focus = Focus::Detail;
    app.handle_key(press(KeyCode::Char('g')), Instant::now());
    assert_eq!(app.focus, Focus::Search);
    assert_eq!(app.input.text(), "g");
}

#[test]
fn ctrl_l_clears_everything() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(ctrl('l'), now);
    assert_eq!(app.input.text(), "");
    assert_eq!(app.controller.input(), "");
    assert!(!app.controller.is_open());
    assert_eq!(app.controller.cached_queries(), 0);
}

#[test]
fn cursor_moves_do_not_restart_debounce() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(press(KeyCode::Left), now);
    app.handle_key(press(KeyCode::Home), now);
    assert!(!app.controller.has_pending_input());
    assert_eq!(app.input.cursor(), 0);
}

#[test]
fn backspace_below_two_chars_closes_panel() {
    let mut app = app();
    let now = search(&mut app, "ac", Instant::now());
    assert!(app.controller.is_open());

    app.handle_key(press(KeyCode::Backspace), now);
    assert!(!app.controller.is_open());
    assert!(!app.controller.has_pending_input());
}

// ===== Failures =====

#[test]
fn failed_lookup_renders_placeholder_and_error_toast() {
    let mut app = app_with(FailingProvider, PathBuf::from("."));
    let now = search(&mut app, "acme", Instant::now());

    assert!(matches!(app.controller.panel(), Some(Panel::Failed { .. })));
    let toast = &app.notifier.visible()[0];
    assert_eq!(toast.severity, Severity::Error);
    assert!(toast.message.contains("Session expired"));

    app.draw(now).unwrap();
    assert!(screen(&app).contains("Search failed"));
}

#[test]
fn lookup_timeout_raises_warning_toast() {
    let mut app = app_with(SlowProvider(Duration::from_millis(300)), PathBuf::from("."));
    let now = Instant::now();
    type_text(&mut app, "acme", now);
    let started = now + DEFAULT_DEBOUNCE;
    app.service(started);

    assert!(app.controller.is_loading());

    app.service(started + Duration::from_secs(60));
    assert!(app.timed_out());
    assert_eq!(app.notifier.visible()[0].severity, Severity::Warning);
}

// ===== Mouse =====

#[test]
fn click_outside_closes_panel() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());
    app.draw(now).unwrap();

    app.handle_mouse(click(5, 20));
    assert!(!app.controller.is_open());
    assert_eq!(app.focus, Focus::Detail);
}

#[test]
fn click_on_row_opens_tenant() {
    let mut app = app();
    let now = search(&mut app, "acme", Instant::now());
    app.draw(now).unwrap();

    let panel = app.layout.panel.unwrap();
    // first line of the second row
    app.handle_mouse(click(panel.x + 3, panel.y + 3));

    assert_eq!(
        app.detail.data().map(|t| t.identifier.as_str()),
        Some("acme-labs")
    );
    assert!(!app.controller.is_open());
}

#[test]
fn click_on_input_refocuses_search() {
    let mut app = app();
    app.focus = Focus::Detail;
    app.draw(Instant::now()).unwrap();

    app.handle_mouse(click(3, 1));
    assert_eq!(app.focus, Focus::Search);
}

// ===== Export and toasts =====

#[test]
fn export_without_results_warns() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with(DirectoryProvider::new(tenants()), dir.path().to_path_buf());

    app.handle_key(ctrl('e'), Instant::now());

    assert_eq!(app.notifier.visible()[0].severity, Severity::Warning);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_csv_writes_file_and_reports_success() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with(DirectoryProvider::new(tenants()), dir.path().to_path_buf());
    let now = search(&mut app, "acme", Instant::now());

    app.handle_key(ctrl('e'), now);

    let toast = &app.notifier.visible()[0];
    assert_eq!(toast.severity, Severity::Success);
    assert!(toast.message.contains("Exported 2 tenants"));

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let contents = std::fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("\"Acme Corp\""));
}

#[test]
fn ctrl_n_dismisses_toasts() {
    let mut app = app();
    app.handle_key(ctrl('e'), Instant::now());
    assert!(!app.notifier.is_empty());

    app.handle_key(ctrl('n'), Instant::now());
    assert!(app.notifier.is_empty());
}

#[test]
fn toasts_expire_on_service() {
    let mut app = app();
    let now = Instant::now();
    app.handle_key(ctrl('e'), now);

    app.service(now + Duration::from_secs(30));
    assert!(app.notifier.is_empty());
}

// ===== Scheduling =====

#[test]
fn poll_timeout_tracks_debounce_deadline() {
    let mut app = app();
    let now = Instant::now();
    assert_eq!(
        app.poll_timeout(now),
        Duration::from_millis(IDLE_POLL_INTERVAL_MS)
    );

    type_text(&mut app, "ac", now);
    let timeout = app.poll_timeout(now + Duration::from_millis(200));
    assert!(timeout <= Duration::from_millis(100), "{timeout:?}");
}

#[test]
fn chord_for_maps_modifiers() {
    let chord = chord_for(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER));
    assert!(chord.meta);
    assert!(chord.is_focus_shortcut());

    let chord = chord_for(press(KeyCode::Esc));
    assert!(chord.escape);
    assert!(!chord.is_focus_shortcut());
}
