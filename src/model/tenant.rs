//! Tenant records as returned by the admin API.

use serde::{Deserialize, Deserializer, Serialize};

/// A single search result: one tenant of the provisioning platform.
///
/// Field names on the wire follow the `/api/tenants` payload
/// (`company_name`, `subdomain`, `email`); unknown fields are ignored.
/// `company_name` is nullable server side and reads as an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMatch {
    /// Human readable company name.
    #[serde(rename = "company_name", default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// Subdomain; the key used to route to the tenant's detail view.
    #[serde(rename = "subdomain")]
    pub identifier: String,
    /// Contact address.
    #[serde(rename = "email", default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Lifecycle status (`active`, `suspended`, `provisioning`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Billing plan (`basic`, `pro`, `enterprise`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

impl TenantMatch {
    /// Create a match with only the required fields set.
    pub fn new(display_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: identifier.into(),
            contact: None,
            status: None,
            plan: None,
        }
    }

    /// Builder-style setter for the contact address.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Builder-style setter for the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder-style setter for the plan.
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Plan label shown in the results panel; the admin UI treats a missing plan as `basic`.
    pub fn plan_label(&self) -> &str {
        self.plan.as_deref().unwrap_or("basic")
    }

    /// Initial shown in the avatar badge.
    pub fn initial(&self) -> char {
        self.display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('T')
    }

    /// Whether any of the searchable fields contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_folded(&self, needle: &str) -> bool {
        self.display_name.to_lowercase().contains(needle)
            || self.identifier.to_lowercase().contains(needle)
            || self
                .contact
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /api/tenants`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantListResponse {
    /// Tenants in server order.
    #[serde(default)]
    pub items: Vec<TenantMatch>,
    /// Total count reported by the server.
    #[serde(default)]
    pub total: Option<usize>,
}
