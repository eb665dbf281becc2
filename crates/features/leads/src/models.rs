use ihub_derive::api_model;

/// A captured marketing lead.
#[api_model]
pub struct Lead {
    /// Record ID
    pub id: String,
    /// Contact e-mail
    pub email: String,
    /// Name, if the form captured one
    pub name: Option<String>,
    /// Acquisition source (landing page, campaign tag)
    pub source: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Unauthenticated capture payload.
#[api_model]
pub struct CaptureLead {
    pub email: String,
    pub name: Option<String>,
    pub source: Option<String>,
}

/// Validates an e-mail address just strictly enough to keep garbage out of
/// the CRM export: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.len() > 254 {
        return false;
    }
    if domain.contains('@') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.contains('.') && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("reader@"));
        assert!(!is_valid_email("reader@nodot"));
        assert!(!is_valid_email("reader@.example.com"));
        assert!(!is_valid_email("rea der@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }
}
