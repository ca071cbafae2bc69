use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{UserResponse, UserUpdate},
    routes::PaginationQuery,
    state::AppState,
    usecases,
};
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Returns the profile of the identity carried by the access token.
#[get("/me")]
pub async fn get_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = usecases::users::get(state.users.as_ref(), auth.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Lists users, password-free. Same plain/paginated split as the task list.
#[get("")]
pub async fn get_users(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    if query.is_paginated() {
        let (page, limit) = query.clamped();
        let page = usecases::users::list_page(state.users.as_ref(), page, limit).await?;
        Ok(HttpResponse::Ok().json(page.map(|u| UserResponse::from(&u))))
    } else {
        let users = usecases::users::list(state.users.as_ref()).await?;
        let responses: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
        Ok(HttpResponse::Ok().json(responses))
    }
}

/// Retrieves a user by ID.
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user = usecases::users::get(state.users.as_ref(), user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Applies a partial profile update (name, lastname, phone, active).
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
    changes: web::Json<UserUpdate>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;

    let user =
        usecases::users::update(state.users.as_ref(), user_id.into_inner(), &changes).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Deletes a user by ID.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    usecases::users::delete(state.users.as_ref(), user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
