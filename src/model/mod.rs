//! Domain model types (pure).
//!
//! Plain data with smart constructors; no I/O.

pub mod error;
pub mod key_action;
pub mod query;
pub mod results;
pub mod tenant;

pub use error::{AppError, ExportError, InputError, ProviderError};
pub use key_action::{KeyAction, KeyChord, PointerTarget, SearchKey, ShortcutOutcome};
pub use query::{SearchQuery, MIN_QUERY_CHARS};
pub use results::{Completion, FailureReason, Panel, QueryTicket, ResultSet};
pub use tenant::{TenantListResponse, TenantMatch};
