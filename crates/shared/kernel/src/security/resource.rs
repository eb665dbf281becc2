use crate::SAFE_ALPHABET;
use std::borrow::Cow;

#[ihub_derive::ihub_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a path ID as a plain safe-alphabet nanoid.
    ///
    /// Prevents "ID smuggling" where a caller embeds a record pointer
    /// (e.g., `system:config`) in a path segment that repositories later
    /// splice into a record id.
    ///
    /// # Errors
    /// Returns an error if the ID is empty, overlong, or contains characters
    /// outside the safe alphabet.
    pub fn verify(id: impl AsRef<str>) -> Result<String, ResourceGuardError> {
        const MAX_LEN: usize = 32;

        let id = id.as_ref();
        if id.is_empty() || id.len() > MAX_LEN {
            return Err(ResourceGuardError::Validation {
                message: format!("ID must be 1..={MAX_LEN} characters").into(),
                context: None,
            });
        }
        if let Some(bad) = id.chars().find(|c| !SAFE_ALPHABET.contains(c)) {
            return Err(ResourceGuardError::Validation {
                message: format!("ID contains invalid character '{bad}'").into(),
                context: None,
            });
        }
        Ok(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_safe_nanoid() {
        assert_eq!(ResourceGuard::verify("aBcD23456789").unwrap(), "aBcD23456789");
    }

    #[test]
    fn rejects_record_pointer() {
        assert!(ResourceGuard::verify("system:config").is_err());
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert!(ResourceGuard::verify("").is_err());
        assert!(ResourceGuard::verify("a".repeat(33)).is_err());
    }

    #[test]
    fn rejects_ambiguous_characters() {
        // 0, 1, I, O, l are excluded from the alphabet
        assert!(ResourceGuard::verify("abc0def").is_err());
        assert!(ResourceGuard::verify("abcIdef").is_err());
    }
}
