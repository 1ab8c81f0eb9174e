//! Result sets and what the results panel currently shows.

use super::{SearchQuery, TenantMatch};

/// Ordered matches for one query, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    query: SearchQuery,
    matches: Vec<TenantMatch>,
}

impl ResultSet {
    /// Wrap provider output for `query`.
    pub fn new(query: SearchQuery, matches: Vec<TenantMatch>) -> Self {
        Self { query, matches }
    }

    /// The query these matches answer.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Matches in provider order.
    pub fn matches(&self) -> &[TenantMatch] {
        &self.matches
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True for the "no results" case.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Why the panel shows the failure placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The provider reported an error; the message is for logs and toasts only.
    Provider(String),
    /// No response arrived within the configured lookup timeout.
    TimedOut,
}

/// Content of the results panel, handed to the host for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// A lookup is in flight.
    Loading {
        /// Query being looked up.
        query: SearchQuery,
    },
    /// Lookup finished. An empty set is the "no results" placeholder.
    Results(ResultSet),
    /// Lookup failed; shown as a generic "search failed" placeholder.
    Failed {
        /// Query that failed.
        query: SearchQuery,
        /// Failure detail.
        reason: FailureReason,
    },
}

impl Panel {
    /// Query the panel was rendered for.
    pub fn query(&self) -> &SearchQuery {
        match self {
            Panel::Loading { query } | Panel::Failed { query, .. } => query,
            Panel::Results(results) => results.query(),
        }
    }

    /// Matches available for keyboard navigation (none while loading or failed).
    pub fn matches(&self) -> &[TenantMatch] {
        match self {
            Panel::Results(results) => results.matches(),
            Panel::Loading { .. } | Panel::Failed { .. } => &[],
        }
    }
}

/// Handle for one provider invocation.
///
/// The generation is compared against the controller's current generation
/// when the response arrives; anything older is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    query: SearchQuery,
}

impl QueryTicket {
    pub(crate) fn new(generation: u64, query: SearchQuery) -> Self {
        Self { generation, query }
    }

    /// Request generation this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Query to look up.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// What happened to a provider response handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results were cached and rendered.
    Applied,
    /// The failure placeholder was rendered.
    Failed,
    /// Response belonged to a superseded query and was dropped.
    Stale,
}
