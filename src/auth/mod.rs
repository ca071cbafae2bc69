pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::Password;
pub use token::{Claims, TokenIssuer};

/// Represents the payload for a user login request.
///
/// Only shape is checked here; whether the credentials match anything is the
/// login use case's concern.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// The real business rules (name lengths, phone format, password policy)
/// live in the domain layer; this DTO only rejects requests that are
/// obviously malformed before a use case runs.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub lastname: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response structure after a successful login: the JWT access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "Password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let empty_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "John".to_string(),
            lastname: "Doe".to_string(),
            phone: "+1234567890".to_string(),
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_email_register = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_register_fields()
        };
        assert!(invalid_email_register.validate().is_err());

        let empty_name_register = RegisterRequest {
            name: "".to_string(),
            ..valid_register_fields()
        };
        assert!(empty_name_register.validate().is_err());
    }

    fn valid_register_fields() -> RegisterRequest {
        RegisterRequest {
            name: "John".to_string(),
            lastname: "Doe".to_string(),
            phone: "+1234567890".to_string(),
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
        }
    }
}
