use uuid::Uuid;

use crate::error::AppError;
use crate::models::Task;
use crate::repo::{Page, Repository};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Task with id {} not found", id))
}

async fn require(repo: &dyn Repository<Task>, id: Uuid) -> Result<Task, AppError> {
    repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create(repo: &dyn Repository<Task>, title: &str) -> Result<Task, AppError> {
    let task = Task::new(Uuid::new_v4(), title, false)?;
    repo.save(&task).await?;
    Ok(task)
}

pub async fn list(repo: &dyn Repository<Task>) -> Result<Vec<Task>, AppError> {
    repo.find_all().await
}

pub async fn list_page(
    repo: &dyn Repository<Task>,
    page: i64,
    limit: i64,
) -> Result<Page<Task>, AppError> {
    repo.find_all_paginated(page, limit).await
}

pub async fn get(repo: &dyn Repository<Task>, id: Uuid) -> Result<Task, AppError> {
    require(repo, id).await
}

pub async fn toggle(repo: &dyn Repository<Task>, id: Uuid) -> Result<Task, AppError> {
    let mut task = require(repo, id).await?;
    task.toggle();
    repo.save(&task).await?;
    Ok(task)
}

/// Renames a task. The entity re-validates the title; a rejected title
/// leaves the stored task untouched because nothing is saved.
pub async fn update_title(
    repo: &dyn Repository<Task>,
    id: Uuid,
    title: &str,
) -> Result<Task, AppError> {
    let mut task = require(repo, id).await?;
    task.update_title(title)?;
    repo.save(&task).await?;
    Ok(task)
}

/// Deletes a task, raising the 404 here; the repository's own `delete`
/// stays an idempotent no-op on absent ids.
pub async fn delete(repo: &dyn Repository<Task>, id: Uuid) -> Result<(), AppError> {
    require(repo, id).await?;
    repo.delete(id).await
}
