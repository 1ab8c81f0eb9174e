//! Tenant lookups against the admin REST API.
//!
//! Mirrors the admin SPA's API client: bearer token when one is configured,
//! 401 means the session expired, any other non-2xx carries the server's
//! `detail` message. The tenant list is filtered client-side.

use super::{filter_tenants, SearchProvider, MAX_MATCHES};
use crate::model::{ProviderError, SearchQuery, TenantListResponse, TenantMatch};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Path of the tenant listing endpoint.
pub const TENANTS_ENDPOINT: &str = "/api/tenants";

/// Request timeout applied by the HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Provider backed by `GET {base_url}/api/tenants`.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
    limit: usize,
}

impl HttpProvider {
    /// Build a provider for `base_url` (scheme and host, no trailing path).
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Network` when the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            limit: MAX_MATCHES,
        })
    }

    /// Override the per-query match cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Full URL of the listing endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, TENANTS_ENDPOINT)
    }

    fn fetch(&self) -> Result<Vec<TenantMatch>, ProviderError> {
        let mut request = self
            .client
            .get(self.endpoint())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        debug!(status, bytes = body.len(), "tenant list fetched");
        parse_tenant_response(status, &body)
    }
}

impl SearchProvider for HttpProvider {
    fn search(&self, query: &SearchQuery) -> Result<Vec<TenantMatch>, ProviderError> {
        let tenants = self.fetch()?;
        Ok(filter_tenants(&tenants, query, self.limit))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Map an HTTP status and body to tenants or a provider error.
pub fn parse_tenant_response(status: u16, body: &str) -> Result<Vec<TenantMatch>, ProviderError> {
    match status {
        200..=299 => serde_json::from_str::<TenantListResponse>(body)
            .map(|list| list.items)
            .map_err(|e| ProviderError::Malformed(e.to_string())),
        401 => Err(ProviderError::SessionExpired),
        _ => Err(ProviderError::Http {
            status,
            message: error_detail(body).unwrap_or_else(|| format!("HTTP {status}")),
        }),
    }
}

fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_returns_items() {
        let body = r#"{"items":[{"company_name":"Acme","subdomain":"acme"}],"total":1}"#;
        let tenants = parse_tenant_response(200, body).unwrap();
        assert_eq!(tenants.len(), 1);
        assert_eq!(tenants[0].identifier, "acme");
    }

    #[test]
    fn nullable_columns_do_not_reject_the_page() {
        let body = r#"{"items":[
            {"id":1,"company_name":null,"subdomain":"acme","email":"ops@acme.test","status":"active","plan":null},
            {"id":2,"company_name":"Globex","subdomain":"globex","email":null,"status":null,"plan":"pro"}
        ],"total":2}"#;
        let tenants = parse_tenant_response(200, body).unwrap();
        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants[0].display_name, "");
        assert_eq!(tenants[0].plan_label(), "basic");
        assert_eq!(tenants[1].contact, None);

        let by_subdomain = filter_tenants(&tenants, &SearchQuery::new("acme").unwrap(), 5);
        assert_eq!(by_subdomain, vec![tenants[0].clone()]);
        let by_email = filter_tenants(&tenants, &SearchQuery::new("ops@acme").unwrap(), 5);
        assert_eq!(by_email.len(), 1);
    }

    #[test]
    fn unauthorized_is_session_expired() {
        assert_eq!(
            parse_tenant_response(401, r#"{"detail":"Not authenticated"}"#),
            Err(ProviderError::SessionExpired)
        );
    }

    #[test]
    fn other_errors_use_detail_message() {
        assert_eq!(
            parse_tenant_response(503, r#"{"detail":"Database unavailable"}"#),
            Err(ProviderError::Http {
                status: 503,
                message: "Database unavailable".to_string()
            })
        );
    }

    #[test]
    fn other_errors_without_detail_use_generic_message() {
        assert_eq!(
            parse_tenant_response(500, "<html>oops</html>"),
            Err(ProviderError::Http {
                status: 500,
                message: "HTTP 500".to_string()
            })
        );
    }

    #[test]
    fn malformed_success_body() {
        assert!(matches!(
            parse_tenant_response(200, "not json"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let provider = HttpProvider::new("https://admin.example.test/", None).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://admin.example.test/api/tenants"
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        let provider = HttpProvider::new("http://localhost", Some(String::new())).unwrap();
        assert_eq!(provider.token, None);
    }
}
