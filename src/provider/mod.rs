//! Search providers.
//!
//! A provider answers one query with at most [`MAX_MATCHES`] tenants:
//! - [`DirectoryProvider`] filters a tenant list loaded from a file or stdin
//! - [`HttpProvider`] fetches the list from the admin API on every lookup
//! - [`LookupWorker`] runs any provider off the UI thread

use crate::model::{ProviderError, SearchQuery, TenantMatch};

pub mod directory;
pub mod http;
pub mod worker;

pub use directory::{DirectoryProvider, TenantSource};
pub use http::HttpProvider;
pub use worker::{LookupResult, LookupWorker};

/// Maximum matches a provider returns for one query.
pub const MAX_MATCHES: usize = 5;

/// Performs the actual lookup for a query.
///
/// Must finish (successfully or not) in finite time. Ordering of the
/// returned matches is provider-defined and preserved by the controller.
pub trait SearchProvider: Send + Sync {
    /// Look up tenants matching `query`.
    fn search(&self, query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError>;
}

impl<P: SearchProvider + ?Sized> SearchProvider for Box<P> {
    fn search(&self, query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError> {
        (**self).search(query)
    }
}

/// Case-insensitive substring filter over name, identifier and contact.
///
/// Keeps the first `limit` hits in input order; no re-sorting.
pub fn filter_tenants(tenants: &[TenantMatch], query: &SearchQuery, limit: usize) -> Vec<TenantMatch> {
    let needle = query.folded();
    tenants
        .iter()
        .filter(|t| t.matches_folded(&needle))
        .take(limit)
        .cloned()
        .collect()
}
