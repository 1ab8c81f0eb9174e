//! In-memory tenant directory loaded once from a file or stdin.

use super::{filter_tenants, SearchProvider, MAX_MATCHES};
use crate::model::{InputError, ProviderError, SearchQuery, TenantListResponse, TenantMatch};
use serde::Deserialize;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Where the tenant document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// JSON piped on stdin.
    Stdin,
}

impl TenantSource {
    /// Pick the file when given, otherwise stdin.
    pub fn detect(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => TenantSource::File(path),
            None => TenantSource::Stdin,
        }
    }
}

impl std::fmt::Display for TenantSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantSource::File(path) => write!(f, "{}", path.display()),
            TenantSource::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Accepts both the API envelope and a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum TenantDocument {
    Bare(Vec<TenantMatch>),
    Envelope(TenantListResponse),
}

/// Provider filtering a fixed tenant list.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    tenants: Vec<TenantMatch>,
    limit: usize,
}

impl DirectoryProvider {
    /// Wrap an already loaded list.
    pub fn new(tenants: Vec<TenantMatch>) -> Self {
        Self {
            tenants,
            limit: MAX_MATCHES,
        }
    }

    /// Override the per-query match cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Load the directory from `source`.
    ///
    /// # Errors
    ///
    /// - `InputError::FileNotFound` for a missing file
    /// - `InputError::NoInput` when stdin is an interactive terminal
    /// - `InputError::Parse` when the JSON is not a tenant list
    pub fn load(source: &TenantSource) -> Result<Self, InputError> {
        let provider = match source {
            TenantSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                let file = std::fs::File::open(path)?;
                Self::from_reader(file, &source.to_string())?
            }
            TenantSource::Stdin => {
                let stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(InputError::NoInput);
                }
                Self::from_reader(stdin.lock(), &source.to_string())?
            }
        };
        info!(
            source = %source,
            tenants = provider.tenants.len(),
            "tenant directory loaded"
        );
        Ok(provider)
    }

    /// Parse a tenant document from any reader.
    pub fn from_reader<R: Read>(mut reader: R, source_name: &str) -> Result<Self, InputError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let document: TenantDocument =
            serde_json::from_str(&contents).map_err(|e| InputError::Parse {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        let tenants = match document {
            TenantDocument::Bare(items) => items,
            TenantDocument::Envelope(envelope) => envelope.items,
        };
        Ok(Self::new(tenants))
    }

    /// Every tenant in the directory.
    pub fn tenants(&self) -> &[TenantMatch] {
        &self.tenants
    }
}

impl SearchProvider for DirectoryProvider {
    fn search(&self, query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError> {
        Ok(filter_tenants(&self.tenants, query, self.limit))
    }
}
