//! Global search box controller.
//!
//! Keystrokes go in, at most one lookup per debounce window comes out.
//! The controller never calls a provider itself: it hands out
//! [`QueryTicket`]s and takes responses back through
//! [`SearchController::complete`], comparing generations so that a slow
//! response to an old query can never overwrite a newer one.
//!
//! ```text
//! CLOSED --[len>=2, debounce fires]--> LOADING --[ok]--> OPEN(results)
//! LOADING --[error | timeout]--> OPEN(failed)
//! OPEN(*) --[Escape | outside click | input < 2]--> CLOSED
//! OPEN(*) --[new input, debounce fires]--> LOADING
//! ```

use crate::model::{
    Completion, FailureReason, KeyChord, Panel, PointerTarget, ProviderError, QueryTicket,
    ResultSet, SearchKey, SearchQuery, ShortcutOutcome, TenantMatch,
};
use crate::state::cache::{ResultCache, DEFAULT_CACHE_CAPACITY};
use crate::state::debounce::{Debounce, DEFAULT_DEBOUNCE};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Default upper bound on how long a lookup may stay in flight.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for [`SearchController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Quiet period after the last keystroke before a lookup starts.
    pub debounce: Duration,
    /// Cached queries kept (0 = unbounded).
    pub cache_capacity: usize,
    /// Give up on a lookup after this long (`None` = wait forever).
    pub lookup_timeout: Option<Duration>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            lookup_timeout: Some(DEFAULT_LOOKUP_TIMEOUT),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    started: Instant,
}

/// Interaction state of the search box.
#[derive(Debug)]
pub struct SearchController {
    input: String,
    open: bool,
    selected: Option<usize>,
    panel: Option<Panel>,
    cache: ResultCache,
    debounce: Debounce<SearchQuery>,
    generation: u64,
    in_flight: Option<InFlight>,
    lookup_timeout: Option<Duration>,
}

impl SearchController {
    /// Create a closed controller with an empty cache.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            input: String::new(),
            open: false,
            selected: None,
            panel: None,
            cache: ResultCache::new(config.cache_capacity),
            debounce: Debounce::new(config.debounce),
            generation: 0,
            in_flight: None,
            lookup_timeout: config.lookup_timeout,
        }
    }

    // ===== Accessors =====

    /// Raw text currently in the input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the results panel is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected row, `None` when nothing is selected.
    pub fn selection(&self) -> Option<usize> {
        self.selected
    }

    /// The selected match, if the selection points at one.
    pub fn selected_match(&self) -> Option<&TenantMatch> {
        let index = self.selected?;
        self.panel.as_ref()?.matches().get(index)
    }

    /// Last rendered panel content (kept while closed so focus can reopen it).
    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// Whether a lookup for the current generation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
            .is_some_and(|f| f.generation == self.generation)
    }

    /// Current request generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of cached queries.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    /// Whether a debounce timer is pending.
    pub fn has_pending_input(&self) -> bool {
        self.debounce.is_armed()
    }

    /// How long the event loop may sleep before [`Self::tick`] has work to do.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let debounce = self.debounce.remaining(now);
        let timeout = match (self.in_flight, self.lookup_timeout) {
            (Some(flight), Some(limit)) if flight.generation == self.generation => {
                Some((flight.started + limit).saturating_duration_since(now))
            }
            _ => None,
        };
        match (debounce, timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ===== Input =====

    /// Record new input text and (re)start the debounce window.
    ///
    /// Text shorter than two characters after trimming cancels any pending
    /// lookup, stops the outstanding one from timing out and closes the panel.
    pub fn on_input(&mut self, raw: impl Into<String>, now: Instant) {
        self.input = raw.into();
        match SearchQuery::new(&self.input) {
            Some(query) => {
                trace!(query = query.as_str(), "debounce armed");
                self.debounce.arm(query, now);
            }
            None => {
                self.debounce.cancel();
                self.close();
                // a late answer may still land, but it no longer times out
                self.in_flight = None;
            }
        }
    }

    /// Advance timers. Returns a ticket when a lookup must be started.
    pub fn tick(&mut self, now: Instant) -> Option<QueryTicket> {
        self.expire_lookup(now);
        let query = self.debounce.fire(now)?;
        self.run_query(query, now)
    }

    /// Execute a query immediately.
    ///
    /// A cached query renders synchronously and returns `None`. Otherwise the
    /// loading placeholder is shown and the returned ticket must be handed to
    /// a provider.
    pub fn run_query(&mut self, query: SearchQuery, now: Instant) -> Option<QueryTicket> {
        self.debounce.cancel();
        self.generation += 1;
        self.in_flight = None;

        if let Some(hit) = self.cache.get(&query) {
            debug!(query = query.as_str(), matches = hit.len(), "cache hit");
            let hit = hit.clone();
            self.render(Panel::Results(hit));
            self.open = true;
            return None;
        }

        debug!(
            query = query.as_str(),
            generation = self.generation,
            "lookup started"
        );
        self.render(Panel::Loading {
            query: query.clone(),
        });
        self.open = true;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            started: now,
        });
        Some(QueryTicket::new(self.generation, query))
    }

    /// Apply a provider response.
    ///
    /// Responses for superseded tickets are dropped. Failures render the
    /// failure placeholder and are never cached. The open state is left
    /// alone, so a response that lands after Escape updates the panel
    /// without popping it back up.
    pub fn complete(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<Vec<TenantMatch>, ProviderError>,
    ) -> Completion {
        if ticket.generation() != self.generation {
            debug!(
                query = ticket.query().as_str(),
                ticket = ticket.generation(),
                current = self.generation,
                "stale response dropped"
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(matches) => {
                let results = ResultSet::new(ticket.query().clone(), matches);
                debug!(
                    query = results.query().as_str(),
                    matches = results.len(),
                    "lookup finished"
                );
                self.cache.insert(results.clone());
                self.render(Panel::Results(results));
                Completion::Applied
            }
            Err(err) => {
                warn!(query = ticket.query().as_str(), %err, "search failed");
                self.render(Panel::Failed {
                    query: ticket.query().clone(),
                    reason: FailureReason::Provider(err.to_string()),
                });
                Completion::Failed
            }
        }
    }

    // ===== Focus / keyboard / pointer =====

    /// Reopen the panel on focus when it already holds content for the
    /// current input. Never starts a lookup. Returns whether it opened.
    pub fn on_focus(&mut self) -> bool {
        let Some(query) = SearchQuery::new(&self.input) else {
            return false;
        };
        if self.panel.as_ref().is_some_and(|p| p.query() == &query) {
            self.open = true;
        }
        self.open
    }

    /// Navigation keys while the panel is open.
    ///
    /// Returns the match to navigate to when Enter confirms a selection.
    pub fn on_key(&mut self, key: SearchKey) -> Option<TenantMatch> {
        if !self.open {
            return None;
        }
        let count = self.panel.as_ref().map_or(0, |p| p.matches().len());

        match key {
            SearchKey::ArrowDown => {
                self.selected = match (count, self.selected) {
                    (0, _) => None,
                    (_, None) => Some(0),
                    (_, Some(i)) => Some((i + 1).min(count - 1)),
                };
                None
            }
            SearchKey::ArrowUp => {
                self.selected = match (count, self.selected) {
                    (0, _) => None,
                    (_, None) => Some(0),
                    (_, Some(i)) => Some(i.saturating_sub(1)),
                };
                None
            }
            SearchKey::Enter => {
                let target = self.selected_match().cloned()?;
                debug!(identifier = target.identifier.as_str(), "navigate");
                self.close();
                Some(target)
            }
            SearchKey::Escape => {
                self.close();
                None
            }
            SearchKey::Other => None,
        }
    }

    /// Pointer press anywhere in the host. Presses outside the input and the
    /// panel close it.
    pub fn on_pointer(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside {
            self.close();
        }
    }

    /// Document-level key handling: platform modifier + K asks the host to
    /// focus the input, Escape closes an open panel.
    pub fn on_global_key(&mut self, chord: KeyChord) -> ShortcutOutcome {
        if chord.is_focus_shortcut() {
            return ShortcutOutcome {
                focus_input: true,
                prevent_default: true,
            };
        }
        if chord.escape && self.open {
            self.close();
        }
        ShortcutOutcome::default()
    }

    // ===== Dismissal =====

    /// Hide the panel and drop the selection. The cache is kept.
    pub fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }

    /// Empty the input, close the panel, forget every cached query and
    /// invalidate any lookup still in flight.
    pub fn clear(&mut self) {
        self.input.clear();
        self.debounce.cancel();
        self.close();
        self.cache.clear();
        self.panel = None;
        self.generation += 1;
        self.in_flight = None;
    }

    // ===== Internals =====

    fn render(&mut self, panel: Panel) {
        self.panel = Some(panel);
        self.selected = None;
    }

    fn expire_lookup(&mut self, now: Instant) {
        let (Some(flight), Some(limit)) = (self.in_flight, self.lookup_timeout) else {
            return;
        };
        if flight.generation != self.generation || now < flight.started + limit {
            return;
        }
        let Some(query) = self.panel.as_ref().map(|p| p.query().clone()) else {
            return;
        };
        warn!(query = query.as_str(), ?limit, "lookup timed out");
        self.generation += 1;
        self.in_flight = None;
        self.render(Panel::Failed {
            query,
            reason: FailureReason::TimedOut,
        });
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
