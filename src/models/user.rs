use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Email, Phone};
use crate::repo::Entity;

/// A user identity, uniquely keyed by its normalized email.
///
/// Instances only come out of `UserBuilder::build`, which runs the full
/// business-rule validation, so an invalid user is never observable. Fields
/// change only through the named operations below, each of which re-validates.
/// The password field holds a bcrypt hash, never a plaintext; it is absent on
/// rehydrated records whose query did not select it.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: String,
    lastname: String,
    phone: Phone,
    email: Email,
    password_hash: Option<String>,
    active: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

fn validate_person_name(value: &str, label: &'static str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < 2 {
        return Err(AppError::Validation(format!(
            "{} must be at least 2 characters long",
            label
        )));
    }
    Ok(trimmed.to_string())
}

impl User {
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn update_name(&mut self, name: &str) -> Result<(), AppError> {
        self.name = validate_person_name(name, "Name")?;
        Ok(())
    }

    pub fn update_lastname(&mut self, lastname: &str) -> Result<(), AppError> {
        self.lastname = validate_person_name(lastname, "Lastname")?;
        Ok(())
    }

    pub fn update_phone(&mut self, phone: &str) -> Result<(), AppError> {
        self.phone = Phone::new(phone)?;
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn mark_saved(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

/// Chained-setter builder for `User`.
///
/// `build` first checks that every mandatory field was set (the credential
/// hash may be filled later), then runs the business-rule validation through
/// the value objects.
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<Uuid>,
    name: Option<String>,
    lastname: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
    active: Option<bool>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn build(self) -> Result<User, AppError> {
        let id = self.id.ok_or(AppError::RequiredField("id"))?;
        let name = self.name.ok_or(AppError::RequiredField("name"))?;
        let lastname = self.lastname.ok_or(AppError::RequiredField("lastname"))?;
        let phone = self.phone.ok_or(AppError::RequiredField("phone"))?;
        let email = self.email.ok_or(AppError::RequiredField("email"))?;

        Ok(User {
            id,
            name: validate_person_name(&name, "Name")?,
            lastname: validate_person_name(&lastname, "Lastname")?,
            phone: Phone::new(&phone)?,
            email: Email::new(&email)?,
            password_hash: self.password_hash,
            active: self.active.unwrap_or(true),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Partial profile update payload. Only the supplied fields change, each
/// re-validated through the entity.
#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub active: Option<bool>,
}

/// User representation safe to return to clients: no credential material.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub lastname: String,
    pub phone: String,
    pub email: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            lastname: user.lastname().to_string(),
            phone: user.phone().as_str().to_string(),
            email: user.email().as_str().to_string(),
            active: user.active(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_builder() -> UserBuilder {
        User::builder()
            .id(Uuid::new_v4())
            .name("John")
            .lastname("Doe")
            .phone("+1234567890")
            .email("john.doe@example.com")
            .password_hash("$2b$10$abcdefghijklmnopqrstuv")
    }

    #[test]
    fn test_builder_creates_valid_user() {
        let user = valid_builder().build().unwrap();
        assert_eq!(user.name(), "John");
        assert_eq!(user.lastname(), "Doe");
        assert_eq!(user.email().as_str(), "john.doe@example.com");
        assert_eq!(user.phone().as_str(), "+1234567890");
        assert!(user.active(), "active should default to true");
        assert!(user.created_at().is_none());
    }

    #[test]
    fn test_builder_normalizes_email() {
        let user = valid_builder().email("John.Doe@Example.COM").build().unwrap();
        assert_eq!(user.email().as_str(), "john.doe@example.com");
    }

    #[test]
    fn test_builder_active_override() {
        let user = valid_builder().active(false).build().unwrap();
        assert!(!user.active());
    }

    #[test]
    fn test_builder_credential_is_optional() {
        let user = User::builder()
            .id(Uuid::new_v4())
            .name("John")
            .lastname("Doe")
            .phone("+1234567890")
            .email("john.doe@example.com")
            .build()
            .unwrap();
        assert!(user.password_hash().is_none());
    }

    #[test]
    fn test_builder_missing_required_fields() {
        let missing_id = User::builder()
            .name("John")
            .lastname("Doe")
            .phone("+1234567890")
            .email("john.doe@example.com")
            .build();
        match missing_id {
            Err(AppError::RequiredField(field)) => assert_eq!(field, "id"),
            other => panic!("Expected required-field error, got {:?}", other),
        }

        let missing_email = User::builder()
            .id(Uuid::new_v4())
            .name("John")
            .lastname("Doe")
            .phone("+1234567890")
            .build();
        match missing_email {
            Err(AppError::RequiredField(field)) => assert_eq!(field, "email"),
            other => panic!("Expected required-field error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_business_rules() {
        assert!(valid_builder().email("invalid-email").build().is_err());
        assert!(valid_builder().phone("invalid").build().is_err());

        match valid_builder().name("J").build() {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Name must be at least 2 characters long")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        match valid_builder().lastname("D").build() {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Lastname must be at least 2 characters long")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        // Whitespace-only names fail even though they are longer than 2 chars raw.
        assert!(valid_builder().name("   ").build().is_err());
    }

    #[test]
    fn test_named_mutations_revalidate() {
        let mut user = valid_builder().build().unwrap();

        user.update_name("Jane").unwrap();
        assert_eq!(user.name(), "Jane");

        assert!(user.update_name("J").is_err());
        assert_eq!(user.name(), "Jane", "failed update must not change the field");

        assert!(user.update_phone("invalid").is_err());
        assert_eq!(user.phone().as_str(), "+1234567890");

        user.set_active(false);
        assert!(!user.active());
    }

    #[test]
    fn test_response_carries_no_credential() {
        let user = valid_builder().build().unwrap();
        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "john.doe@example.com");
    }
}
