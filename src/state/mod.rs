//! Search box state (pure).
//!
//! All transitions take the current time as an argument and perform no I/O,
//! so they are testable without a terminal or a network.

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod highlight;
pub mod input_handler;
pub mod notify;
pub mod store;

// Re-export for convenience
pub use cache::ResultCache;
pub use controller::{ControllerConfig, SearchController};
pub use debounce::Debounce;
pub use highlight::{highlight, Segment};
pub use input_handler::InputBuffer;
pub use notify::{Notifier, Severity, Toast, ToastId};
pub use store::{ResultStore, StoreState, SubscriptionId};
