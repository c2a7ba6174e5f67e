//! Email address format validation.

/// Validate an email address: exactly one `@`, non-empty local part,
/// domain with at least one dot and no leading/trailing dot, no whitespace.
///
/// Deliberately permissive — the mailbox is the real validator; this only
/// rejects input that cannot be an address at all.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    true
}
