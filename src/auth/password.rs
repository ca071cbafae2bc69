use crate::error::AppError;
use bcrypt::{hash, verify};

// Cost factor for bcrypt. Hashing at this cost takes tens of milliseconds on
// purpose; callers must not hold other resources across it.
const BCRYPT_COST: u32 = 10;

/// A credential in one of two states: a policy-checked plaintext (from
/// `create`) or an opaque hash (from `from_hash`). The conversion from the
/// first state to the second happens exactly once, via `hash`, before
/// storage. A plaintext-state value must never be logged or persisted.
#[derive(Debug, Clone)]
pub struct Password {
    value: String,
}

impl Password {
    /// Wraps a plaintext after checking the password policy. No hashing yet.
    pub fn create(plaintext: &str) -> Result<Self, AppError> {
        Self::validate(plaintext)?;
        Ok(Self {
            value: plaintext.to_string(),
        })
    }

    /// Wraps an already-hashed value. The policy is not re-checked; the
    /// store is trusted.
    pub fn from_hash(hashed: impl Into<String>) -> Self {
        Self {
            value: hashed.into(),
        }
    }

    fn validate(password: &str) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".into()));
        }
        if password.chars().count() < 8 {
            return Err(AppError::Validation(
                "Password must be at least 8 characters long".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AppError::Validation(
                "Password must contain at least one lowercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AppError::Validation(
                "Password must contain at least one uppercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::Validation(
                "Password must contain at least one number".into(),
            ));
        }
        Ok(())
    }

    /// Produces a salted one-way hash of the held value. The salt is
    /// randomized, so two hashes of the same plaintext differ while both
    /// verify against it.
    pub fn hash(&self) -> Result<String, AppError> {
        hash(&self.value, BCRYPT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a candidate plaintext against the held hash. A mismatch is
    /// `Ok(false)`, never an error.
    pub fn compare(&self, candidate: &str) -> Result<bool, AppError> {
        verify(candidate, &self.value)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
