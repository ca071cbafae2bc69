use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::repo::Entity;

/// Input structure for creating or renaming a task.
///
/// Only presence is checked here; the length bounds and trimming live in the
/// `Task` entity itself.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

/// A task entity. The title invariant (trimmed, 3 to 200 characters) holds
/// from construction onward; there is no way to observe a `Task` that
/// violates it.
///
/// Timestamps are owned by the persistence layer: they are `None` on a fresh
/// entity and filled in when the repository stores or rehydrates it.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    id: Uuid,
    title: String,
    completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

fn validate_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Task title cannot be empty".into()));
    }
    if trimmed.chars().count() < 3 {
        return Err(AppError::Validation(
            "Task title must be at least 3 characters long".into(),
        ));
    }
    if trimmed.chars().count() > 200 {
        return Err(AppError::Validation(
            "Task title cannot exceed 200 characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}

impl Task {
    pub fn new(id: Uuid, title: &str, completed: bool) -> Result<Self, AppError> {
        Ok(Self {
            id,
            title: validate_title(title)?,
            completed,
            created_at: None,
            updated_at: None,
        })
    }

    /// Attaches persistence-layer timestamps, used when rehydrating a stored row.
    pub fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Flips the completion flag. Always valid.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Replaces the title after re-running the full title validation.
    /// On failure the task is left untouched.
    pub fn update_title(&mut self, new_title: &str) -> Result<(), AppError> {
        self.title = validate_title(new_title)?;
        Ok(())
    }
}

impl Entity for Task {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn task_id() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_task_creation() {
        let task = Task::new(task_id(), "Test Task", false).unwrap();
        assert_eq!(task.title(), "Test Task");
        assert!(!task.completed());
        assert!(task.created_at().is_none());

        let done = Task::new(task_id(), "Test Task", true).unwrap();
        assert!(done.completed());
    }

    #[test]
    fn test_title_is_trimmed() {
        let task = Task::new(task_id(), "  Valid  ", false).unwrap();
        assert_eq!(task.title(), "Valid");
    }

    #[test]
    fn test_empty_title_rejected() {
        match Task::new(task_id(), "", false) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Task title cannot be empty"),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert!(Task::new(task_id(), "   ", false).is_err());
    }

    #[test]
    fn test_title_length_bounds() {
        match Task::new(task_id(), "AB", false) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Task title must be at least 3 characters long")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let long_title = "A".repeat(201);
        match Task::new(task_id(), &long_title, false) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Task title cannot exceed 200 characters")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        // Both boundaries are inclusive.
        assert!(Task::new(task_id(), "ABC", false).is_ok());
        assert!(Task::new(task_id(), &"A".repeat(200), false).is_ok());
    }

    #[test]
    fn test_toggle() {
        let mut task = Task::new(task_id(), "Test Task", false).unwrap();

        task.toggle();
        assert!(task.completed());

        task.toggle();
        assert!(!task.completed());

        task.toggle();
        assert!(task.completed());
    }

    #[test]
    fn test_update_title() {
        let mut task = Task::new(task_id(), "Test Task", false).unwrap();

        task.update_title("Updated Task").unwrap();
        assert_eq!(task.title(), "Updated Task");

        task.update_title("  Padded  ").unwrap();
        assert_eq!(task.title(), "Padded");
    }

    #[test]
    fn test_failed_update_leaves_title_unchanged() {
        let mut task = Task::new(task_id(), "Original", false).unwrap();

        assert!(task.update_title("").is_err());
        assert_eq!(task.title(), "Original");

        assert!(task.update_title("AB").is_err());
        assert_eq!(task.title(), "Original");

        assert!(task.update_title(&"A".repeat(201)).is_err());
        assert_eq!(task.title(), "Original");
    }

    #[test]
    fn test_mark_saved_keeps_original_created_at() {
        let mut task = Task::new(task_id(), "Test Task", false).unwrap();

        let first = Utc::now();
        task.mark_saved(first);
        assert_eq!(task.created_at(), Some(first));
        assert_eq!(task.updated_at(), Some(first));

        let later = first + chrono::Duration::seconds(5);
        task.mark_saved(later);
        assert_eq!(task.created_at(), Some(first));
        assert_eq!(task.updated_at(), Some(later));
    }
}
