use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenIssuer;
use crate::models::{Task, User};
use crate::repo::{
    InMemoryRepository, PgTaskRepository, PgUserRepository, Repository, UserRepository,
};

/// Shared application state: the two repositories behind their contracts and
/// the token issuer. Which backend sits behind the trait objects is decided
/// once, at startup; handlers and use cases never know.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn Repository<Task>>,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// State backed by the in-memory repositories. Used for local
    /// development without a database, and by the integration tests.
    pub fn in_memory(tokens: TokenIssuer) -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            tasks: Arc::new(InMemoryRepository::<Task>::new()),
            tokens,
        }
    }

    /// State backed by the durable Postgres repositories.
    pub fn postgres(pool: PgPool, tokens: TokenIssuer) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tasks: Arc::new(PgTaskRepository::new(pool)),
            tokens,
        }
    }
}
