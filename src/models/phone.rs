use crate::error::AppError;
use lazy_static::lazy_static;
use std::fmt;

lazy_static! {
    // E.164-like: optional +, no leading zero, up to 15 digits.
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();
}

/// A phone number in an E.164-like format, validated at construction.
///
/// The held value is the trimmed input; internal spaces and hyphens are
/// stripped only for the format check, e.g. `+51 999-999-999` validates but
/// is stored as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Phone is required".into()));
        }
        let compact: String = trimmed.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
        if !PHONE_REGEX.is_match(&compact) {
            return Err(AppError::Validation("Invalid phone format".into()));
        }
        Ok(Phone(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
