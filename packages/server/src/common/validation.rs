//! Input shape checks shared by the auth and inquiry forms.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Same shape the site forms accept: something@something.something
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    // E.164: leading plus, 8 to 15 ASCII digits
    static ref E164_REGEX: Regex = Regex::new(r"^\+[0-9]{8,15}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

pub fn is_e164_phone(phone_number: &str) -> bool {
    E164_REGEX.is_match(phone_number.trim())
}

/// Trimmed value, or `None` when blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
