pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;
use serde::Deserialize;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::toggle_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/users")
            .service(users::get_me)
            .service(users::get_users)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}

/// Optional pagination parameters. The repository contract leaves clamping
/// to the caller, so the routes clamp here: page >= 1, limit in [1, 100].
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    pub fn clamped(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        (page, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamping() {
        let query = PaginationQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(query.clamped(), (1, 100));

        let query = PaginationQuery {
            page: Some(-3),
            limit: Some(0),
        };
        assert_eq!(query.clamped(), (1, 1));

        let query = PaginationQuery {
            page: None,
            limit: None,
        };
        assert!(!query.is_paginated());
        assert_eq!(query.clamped(), (1, 10));

        let query = PaginationQuery {
            page: Some(2),
            limit: None,
        };
        assert!(query.is_paginated());
        assert_eq!(query.clamped(), (2, 10));
    }
}
