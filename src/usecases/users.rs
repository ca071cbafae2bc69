use uuid::Uuid;

use crate::error::AppError;
use crate::models::{User, UserUpdate};
use crate::repo::{Page, Repository, UserRepository};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User with id {} not found", id))
}

async fn require(repo: &dyn UserRepository, id: Uuid) -> Result<User, AppError> {
    repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

pub async fn list(repo: &dyn UserRepository) -> Result<Vec<User>, AppError> {
    repo.find_all().await
}

pub async fn list_page(
    repo: &dyn UserRepository,
    page: i64,
    limit: i64,
) -> Result<Page<User>, AppError> {
    repo.find_all_paginated(page, limit).await
}

pub async fn get(repo: &dyn UserRepository, id: Uuid) -> Result<User, AppError> {
    require(repo, id).await
}

/// Applies a partial profile update. Each supplied field goes through the
/// entity's re-validating mutator, so a rejected value fails the whole
/// request before anything is saved. The email is the unique key and cannot
/// be changed here.
pub async fn update(
    repo: &dyn UserRepository,
    id: Uuid,
    changes: &UserUpdate,
) -> Result<User, AppError> {
    let mut user = require(repo, id).await?;

    if let Some(name) = &changes.name {
        user.update_name(name)?;
    }
    if let Some(lastname) = &changes.lastname {
        user.update_lastname(lastname)?;
    }
    if let Some(phone) = &changes.phone {
        user.update_phone(phone)?;
    }
    if let Some(active) = changes.active {
        user.set_active(active);
    }

    repo.save(&user).await?;
    Ok(user)
}

pub async fn delete(repo: &dyn UserRepository, id: Uuid) -> Result<(), AppError> {
    require(repo, id).await?;
    repo.delete(id).await
}
