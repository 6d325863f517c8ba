use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Field name to the single message shown for it.
pub type FieldErrors = BTreeMap<&'static str, String>;

// Pattern is a literal, so construction cannot fail at runtime.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Loose check: something@something.something anywhere in the input.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}
