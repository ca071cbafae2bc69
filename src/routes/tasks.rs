use crate::{
    error::AppError,
    models::TaskInput,
    routes::PaginationQuery,
    state::AppState,
    usecases,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves tasks.
///
/// Without query parameters the full list is returned in storage order. With
/// `page` and/or `limit` the response switches to the paginated
/// `{data, total}` shape; out-of-range values are clamped (page >= 1,
/// limit 1..=100).
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> Result<impl Responder, AppError> {
    if query.is_paginated() {
        let (page, limit) = query.clamped();
        let page = usecases::tasks::list_page(state.tasks.as_ref(), page, limit).await?;
        Ok(HttpResponse::Ok().json(page))
    } else {
        let tasks = usecases::tasks::list(state.tasks.as_ref()).await?;
        Ok(HttpResponse::Ok().json(tasks))
    }
}

/// Creates a new task.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created task as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If the title violates the length bounds.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = usecases::tasks::create(state.tasks.as_ref(), &task_data.title).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = usecases::tasks::get(state.tasks.as_ref(), task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces a task's title. The stored task is unchanged if the new title
/// fails validation.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = usecases::tasks::update_title(
        state.tasks.as_ref(),
        task_id.into_inner(),
        &task_data.title,
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Flips a task's completion flag.
#[patch("/{id}/toggle")]
pub async fn toggle_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = usecases::tasks::toggle(state.tasks.as_ref(), task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `404 Not Found`: If the task with the given ID does not exist.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    usecases::tasks::delete(state.tasks.as_ref(), task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
