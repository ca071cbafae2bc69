use uuid::Uuid;

use crate::auth::{Password, RegisterRequest, TokenIssuer};
use crate::error::AppError;
use crate::models::User;
use crate::repo::{Repository, UserRepository};

/// Registers a new identity.
///
/// Checks email uniqueness first (nothing is persisted on a duplicate), then
/// runs the password policy, hashes the credential, and constructs the entity
/// through the builder so every identity invariant holds before the save.
/// The race between two concurrent registrations for the same email is
/// settled by the storage layer's unique constraint, which also surfaces as
/// `AppError::DuplicateEmail`.
pub async fn register(
    users: &dyn UserRepository,
    input: &RegisterRequest,
) -> Result<User, AppError> {
    if users.find_by_email(&input.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = Password::create(&input.password)?.hash()?;

    let user = User::builder()
        .id(Uuid::new_v4())
        .name(input.name.as_str())
        .lastname(input.lastname.as_str())
        .phone(input.phone.as_str())
        .email(input.email.as_str())
        .password_hash(password_hash)
        .active(true)
        .build()?;

    users.save(&user).await?;
    log::info!("Registered user {}", user.id());
    Ok(user)
}

/// Authenticates an identity and issues an access token.
///
/// A lookup miss and a hash mismatch both answer with the same generic
/// `InvalidCredentials` so the endpoint cannot be used to enumerate emails.
/// A stored user without a credential hash is data corruption, not a client
/// error, and is reported as such.
pub async fn login(
    users: &dyn UserRepository,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = users
        .find_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let stored_hash = user.password_hash().ok_or_else(|| {
        AppError::Integrity(format!("User {} has no stored password hash", user.id()))
    })?;

    if !Password::from_hash(stored_hash).compare(password)? {
        return Err(AppError::InvalidCredentials);
    }

    tokens.issue(user.id(), user.email().as_str())
}
