use ihub_derive::api_model;
use serde::{Deserialize, Serialize};
use surrealdb_types::SurrealValue;
use utoipa::ToSchema;

/// Lifecycle of a domain registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Stored, provisioning not attempted yet.
    Pending,
    /// At least one provisioning run happened; some steps remain open.
    InProgress,
    /// All four provisioning steps succeeded.
    Completed,
}

impl RegistrationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parses the stored representation; unknown strings fall back to pending.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        match value {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

/// Completion flags for the four provisioning steps.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, SurrealValue,
)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningSteps {
    /// Domain ordered through the registrar.
    pub registered: bool,
    /// DNS zone provisioned.
    pub zone_created: bool,
    /// Registrar pointed at the zone's name servers.
    pub nameservers_updated: bool,
    /// Custom domain bound to the edge endpoint.
    pub edge_bound: bool,
}

impl ProvisioningSteps {
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.registered && self.zone_created && self.nameservers_updated && self.edge_bound
    }
}

/// A tracked domain registration.
#[api_model]
pub struct DomainRegistration {
    /// Record ID
    pub id: String,
    /// Owning user principal
    pub upn: String,
    /// Fully qualified domain name
    pub domain: String,
    /// Registration lifecycle state
    pub status: RegistrationStatus,
    /// Per-step completion flags
    pub steps: ProvisioningSteps,
    /// Name servers delegated to the provisioned zone
    pub name_servers: Vec<String>,
    /// Most recent provisioning failure, if any
    pub last_error: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last modification timestamp (RFC 3339)
    pub updated_at: String,
}

/// Payload for requesting a domain registration.
#[api_model]
pub struct CreateDomainRegistration {
    pub domain: String,
}

/// Availability report for a domain name.
#[api_model]
pub struct AvailabilityReport {
    pub domain: String,
    pub available: bool,
    pub price_usd: Option<f64>,
}

/// Change record enqueued when a registration is inserted or re-triggered.
#[derive(Debug, Clone)]
pub struct DomainRegistrationRequested {
    pub id: String,
}

/// Validates a fully qualified domain name.
///
/// Accepts lowercase ASCII labels of letters, digits and inner hyphens,
/// at least two labels, and an alphabetic TLD of two or more characters.
#[must_use]
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.len() < 4 || domain.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return false;
        }
    }
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{ProvisioningSteps, is_valid_domain};

    #[test]
    fn accepts_ordinary_domains() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("my-pen-name.co.uk"));
        assert!(is_valid_domain("a1.io"));
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("nodots"));
        assert!(!is_valid_domain("double..dot.com"));
        assert!(!is_valid_domain("-leading.com"));
        assert!(!is_valid_domain("trailing-.com"));
        assert!(!is_valid_domain("spaces in.com"));
        assert!(!is_valid_domain("Upper.Case.Com"));
        assert!(!is_valid_domain("numeric.tld.42"));
        assert!(!is_valid_domain("registration:smuggle.com"));
    }

    #[test]
    fn completion_requires_every_flag() {
        let mut steps = ProvisioningSteps::default();
        assert!(!steps.is_complete());

        steps.registered = true;
        steps.zone_created = true;
        steps.nameservers_updated = true;
        assert!(!steps.is_complete());

        steps.edge_bound = true;
        assert!(steps.is_complete());
    }
}
