use crate::error::AppError;
use lazy_static::lazy_static;
use std::fmt;

lazy_static! {
    // Local part and domain must both be non-empty and the domain must carry a dot.
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// An email address, validated and normalized at construction.
///
/// The held value is always trimmed and lowercased, so two `Email`s compare
/// equal whenever their raw inputs differ only in case or surrounding
/// whitespace. Used as the unique key for users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AppError::Validation("Email is required".into()));
        }
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(AppError::Validation("Invalid email format".into()));
        }
        Ok(Email(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
