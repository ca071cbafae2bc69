use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User};
use crate::repo::{Page, Repository, UserRepository};

/// Raw `users` row. Mapped into the domain entity through the validating
/// builder, so even data read back from the store passes the business rules.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    lastname: String,
    phone: String,
    email: String,
    password: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, AppError> {
        let mut builder = User::builder()
            .id(self.id)
            .name(self.name)
            .lastname(self.lastname)
            .phone(self.phone)
            .email(self.email)
            .active(self.active)
            .created_at(self.created_at)
            .updated_at(self.updated_at);
        if let Some(hash) = self.password {
            builder = builder.password_hash(hash);
        }
        builder.build()
    }
}

/// Raw `tasks` row.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_domain(self) -> Result<Task, AppError> {
        Ok(Task::new(self.id, &self.title, self.completed)?
            .with_timestamps(self.created_at, self.updated_at))
    }
}

const USER_COLUMNS: &str = "id, name, lastname, phone, email, password, active, created_at, updated_at";
const TASK_COLUMNS: &str = "id, title, completed, created_at, updated_at";

/// Durable user store on Postgres.
///
/// `created_at`/`updated_at` are set by the database (column defaults on
/// insert, `now()` on upsert-update), and the unique index on `email` is the
/// source of truth for identity uniqueness: a concurrent duplicate insert
/// surfaces as SQLSTATE 23505 and maps to the duplicate-email error.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_domain).collect()
    }

    async fn find_all_paginated(&self, page: i64, limit: i64) -> Result<Page<User>, AppError> {
        let offset = (page - 1) * limit;
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY created_at LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            data: rows
                .into_iter()
                .map(UserRow::into_domain)
                .collect::<Result<_, _>>()?,
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, name, lastname, phone, email, password, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name, lastname = EXCLUDED.lastname,
                 phone = EXCLUDED.phone, email = EXCLUDED.email,
                 password = EXCLUDED.password, active = EXCLUDED.active,
                 updated_at = now()",
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.lastname())
        .bind(user.phone().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.active())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // Idempotent: zero affected rows is not an error at this layer.
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let needle = email.trim().to_lowercase();
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(needle)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }
}

/// Durable task store on Postgres.
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Task> for PgTaskRepository {
    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_domain).collect()
    }

    async fn find_all_paginated(&self, page: i64, limit: i64) -> Result<Page<Task>, AppError> {
        let offset = (page - 1) * limit;
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks ORDER BY created_at LIMIT $1 OFFSET $2",
            TASK_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page {
            data: rows
                .into_iter()
                .map(TaskRow::into_domain)
                .collect::<Result<_, _>>()?,
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_domain).transpose()
    }

    async fn save(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tasks (id, title, completed)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE
             SET title = EXCLUDED.title, completed = EXCLUDED.completed,
                 updated_at = now()",
        )
        .bind(task.id())
        .bind(task.title())
        .bind(task.completed())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
