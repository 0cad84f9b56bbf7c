//! Primitive field validators and their fixed failure messages.
//!
//! Every message here is user-safe and declared exactly once; composite
//! schemas reference these rather than restating rules.

pub(crate) const MSG_EMAIL: &str = "Please enter a valid email address";
pub(crate) const MSG_PASSWORD_REQUIRED: &str = "Password is required";
pub(crate) const MSG_PASSWORD_WEAK: &str =
    "Password must be at least 8 characters and include a letter and a number";
pub(crate) const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub(crate) const MSG_PHONE: &str = "Please enter a valid phone number";
pub(crate) const MSG_OTP: &str = "Verification code must be 6 digits";
pub(crate) const MSG_DISPLAY_NAME: &str = "Name must be at least 2 characters";
pub(crate) const MSG_OAUTH_PROVIDER: &str = "Unsupported sign-in provider";
pub(crate) const MSG_OAUTH_CODE: &str = "Missing authorization code";

/// OAuth providers the portal can start a redirect flow for.
pub(crate) const OAUTH_PROVIDERS: &[&str] = &["google", "apple", "facebook"];

pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    // Domain needs at least one dot with something on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Minimum 8 characters with at least one letter and one digit.
pub(crate) fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Loose E.164 shape: optional leading `+`, 7 to 15 digits, with common
/// separators tolerated.
pub(crate) fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (7..=15).contains(&digits.len())
}

pub(crate) fn is_valid_otp(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn is_valid_display_name(value: &str) -> bool {
    value.trim().chars().count() >= 2
}
