//! Input validation rules
//!
//! Pure functions with no side effects. Both the shorten and QR endpoints use
//! the same URL predicate.

use url::Url;

use crate::error::{AliasViolation, AppError};

/// Longest alias a user may request
pub const MAX_ALIAS_LENGTH: usize = 32;

/// Schemes accepted for destinations
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Returns `true` when `input` is an absolute http(s) URL with a non-empty host
///
/// Malformed input is simply invalid; nothing is raised to the caller.
///
/// The `url` parser normalizes the scheme to lowercase, so `HTTP://example.com`
/// is accepted. It also silently drops tabs and newlines and tolerates a missing
/// `//`; the input is stored verbatim, so both are rejected here.
pub fn is_valid_url(input: &str) -> bool {
    if input.chars().any(|c| c.is_ascii_control()) || !has_authority(input) {
        return false;
    }

    match Url::parse(input) {
        Ok(parsed) => {
            ALLOWED_SCHEMES.contains(&parsed.scheme())
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// `scheme://` form, as opposed to `http:example.com` or `https:/example.com`
fn has_authority(input: &str) -> bool {
    input
        .split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with("//"))
}

/// Checks a requested alias: 1 to 32 characters from `[A-Za-z0-9_-]`
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.chars().count() > MAX_ALIAS_LENGTH {
        return Err(AppError::InvalidAlias(AliasViolation::TooLong));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if alias.is_empty() || !alias.chars().all(allowed) {
        return Err(AppError::InvalidAlias(AliasViolation::Characters));
    }

    Ok(())
}
