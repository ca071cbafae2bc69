//!
//! # Persistence Contract
//!
//! Storage-agnostic repository interface over entities keyed by an opaque
//! `Uuid`. Two backends implement it with identical behavior: an in-memory
//! keyed list (`memory`) and a Postgres store (`postgres`); which one backs a
//! running process is decided once at startup from configuration.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

pub use memory::InMemoryRepository;
pub use postgres::{PgTaskRepository, PgUserRepository};

/// A persistable entity with an opaque unique key.
pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> Uuid;

    /// Called by repositories when a record is stored: sets `created_at` on
    /// first save and refreshes `updated_at`. Timestamps belong to the
    /// persistence layer, not to the entities' business rules.
    fn mark_saved(&mut self, now: DateTime<Utc>);
}

/// One page of results plus the exact total count across all pages.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Create/read/update/delete plus paginated listing.
///
/// `save` is an upsert: an existing record with the same id is replaced,
/// otherwise the entity is inserted. `delete` is idempotent: deleting an
/// absent id is a no-op; callers that need a 404 check existence first.
/// `find_all_paginated` computes `offset = (page - 1) * limit` and trusts the
/// caller to clamp `page >= 1` and `limit` into `[1, 100]`.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<T>, AppError>;

    async fn find_all_paginated(&self, page: i64, limit: i64) -> Result<Page<T>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, AppError>;

    async fn save(&self, item: &T) -> Result<(), AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// User lookups beyond the generic contract. Uniqueness is enforced on the
/// email, not on the opaque id, so registration and login address users by
/// their normalized email.
#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
