//! tenantfind
//!
//! Terminal tenant search for the admin console: a debounced, cached search
//! box over the tenant directory with keyboard navigation.
//!
//! Follows a Pure Core / Impure Shell split: [`model`] and [`state`] hold
//! plain data and time-injected state machines, [`provider`] and [`view`]
//! do the I/O.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod provider;
pub mod state;
pub mod view;
