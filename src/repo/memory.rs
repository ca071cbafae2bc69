use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::repo::{Entity, Page, Repository, UserRepository};

/// In-memory backend: a mutex-guarded list in insertion order, linear search.
///
/// Useful for local development and for integration tests that should not
/// need a live database. Behaves exactly like the Postgres backend from the
/// contract's point of view, including persistence-owned timestamps.
pub struct InMemoryRepository<T> {
    items: Mutex<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<T>>, AppError> {
        self.items
            .lock()
            .map_err(|_| AppError::Internal("repository lock poisoned".into()))
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity + 'static> Repository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, AppError> {
        Ok(self.lock()?.clone())
    }

    async fn find_all_paginated(&self, page: i64, limit: i64) -> Result<Page<T>, AppError> {
        let items = self.lock()?;
        let offset = (page - 1) * limit;
        let data = items
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(Page {
            data,
            total: items.len() as i64,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, AppError> {
        Ok(self.lock()?.iter().find(|i| i.id() == id).cloned())
    }

    async fn save(&self, item: &T) -> Result<(), AppError> {
        let mut stored = item.clone();
        stored.mark_saved(Utc::now());

        let mut items = self.lock()?;
        match items.iter_mut().find(|i| i.id() == item.id()) {
            Some(slot) => *slot = stored,
            None => items.push(stored),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.lock()?.retain(|i| i.id() != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let needle = email.trim().to_lowercase();
        Ok(self
            .lock()?
            .iter()
            .find(|u| u.email().as_str() == needle)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use pretty_assertions::assert_eq;

    fn task(title: &str) -> Task {
        Task::new(Uuid::new_v4(), title, false).unwrap()
    }

    fn user(email: &str) -> User {
        User::builder()
            .id(Uuid::new_v4())
            .name("John")
            .lastname("Doe")
            .phone("+1234567890")
            .email(email)
            .password_hash("$2b$10$abcdefghijklmnopqrstuv")
            .build()
            .unwrap()
    }

    #[test_log::test(actix_rt::test)]
    async fn test_round_trip_preserves_fields() {
        let repo = InMemoryRepository::new();
        let original = task("Round trip");

        repo.save(&original).await.unwrap();
        let fetched = repo.find_by_id(original.id()).await.unwrap().unwrap();

        assert_eq!(fetched.id(), original.id());
        assert_eq!(fetched.title(), original.title());
        assert_eq!(fetched.completed(), original.completed());
        // Timestamps were stamped by the store, not carried from the input.
        assert!(original.created_at().is_none());
        assert!(fetched.created_at().is_some());
        assert!(fetched.updated_at().is_some());
    }

    #[test_log::test(actix_rt::test)]
    async fn test_save_is_an_upsert() {
        let repo = InMemoryRepository::new();
        let mut task = task("Before");
        repo.save(&task).await.unwrap();

        task.update_title("After").unwrap();
        repo.save(&task).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title(), "After");
    }

    #[test_log::test(actix_rt::test)]
    async fn test_insertion_order_preserved() {
        let repo = InMemoryRepository::new();
        for i in 1..=5 {
            repo.save(&task(&format!("Task {}", i))).await.unwrap();
        }
        let titles: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|t| t.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Task 1", "Task 2", "Task 3", "Task 4", "Task 5"]);
    }

    #[test_log::test(actix_rt::test)]
    async fn test_pagination_window_and_total() {
        let repo = InMemoryRepository::new();
        for i in 1..=25 {
            repo.save(&task(&format!("Task {}", i))).await.unwrap();
        }

        let page = repo.find_all_paginated(2, 10).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0].title(), "Task 11");
        assert_eq!(page.data[9].title(), "Task 20");

        // Last, partial page.
        let page = repo.find_all_paginated(3, 10).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].title(), "Task 21");

        // Past the end: empty data, exact total.
        let page = repo.find_all_paginated(4, 10).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 25);
    }

    #[test_log::test(actix_rt::test)]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryRepository::new();
        let task = task("Disposable");
        repo.save(&task).await.unwrap();

        repo.delete(task.id()).await.unwrap();
        assert!(repo.find_by_id(task.id()).await.unwrap().is_none());

        // Deleting again is a quiet no-op at this layer.
        repo.delete(task.id()).await.unwrap();
        repo.delete(Uuid::new_v4()).await.unwrap();
    }

    #[test_log::test(actix_rt::test)]
    async fn test_find_by_email_normalizes_the_needle() {
        let repo = InMemoryRepository::new();
        repo.save(&user("john.doe@example.com")).await.unwrap();

        let found = repo.find_by_email("  John.Doe@EXAMPLE.com ").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email().as_str(), "john.doe@example.com");

        assert!(repo.find_by_email("other@example.com").await.unwrap().is_none());
    }
}
