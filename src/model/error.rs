//! Error types for tenantfind.
//!
//! The taxonomy follows how far each failure is allowed to travel:
//!
//! - [`ProviderError`] - a lookup failed. Never propagates past the
//!   controller; it is rendered as the "search failed" placeholder.
//! - [`InputError`] - the tenant directory could not be loaded. Fatal at
//!   startup.
//! - [`ExportError`] - writing an export file failed. Reported as a toast.
//! - [`AppError`] - everything `main` may return, composed via `From`.
//!
//! Short queries are not errors: `SearchQuery::new` simply returns `None`.
//! Stale responses are not errors either: they are dropped with a debug log.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert into `AppError` via `From`, so `main` can use `?`
/// across config loading, logging setup, directory loading and the TUI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Tenant directory could not be read or parsed.
    #[error("Failed to load tenants: {0}")]
    Input(#[from] InputError),

    /// Config file exists but is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup, rendering or worker startup failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),

    /// The lookup provider could not be constructed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// A tenant lookup failed.
///
/// Carries strings rather than source errors so results can cross the
/// worker channel and be compared in tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Connection refused, DNS failure, TLS error, timeout in the client.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered 401; the bearer token is no longer valid.
    #[error("Session expired")]
    SessionExpired,

    /// Any other non-2xx response.
    #[error("Request failed ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// `detail` from the error body, or a generic message.
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The lookup worker is gone.
    #[error("Search provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors encountered when loading the tenant directory from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given directory file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tenantfind::model::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No file, no API URL, and stdin is a terminal.
    #[error("No tenant source: pass a file, pipe JSON on stdin, or configure api_url")]
    NoInput,

    /// The document is not a tenant list.
    #[error("Invalid tenant document from {source_name}: {reason}")]
    Parse {
        /// File path or `<stdin>`.
        source_name: String,
        /// serde_json error message.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writing an export file failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There is nothing to export.
    #[error("No results to export")]
    Empty,

    /// Serialization failed.
    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
}
