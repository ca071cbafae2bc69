use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    models::UserResponse,
    state::AppState,
    usecases,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its password-free representation.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input shape; business rules run in the use case.
    register_data.validate()?;

    let user = usecases::auth::register(state.users.as_ref(), &register_data).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Login user
///
/// Authenticates a user and returns a signed access token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let access_token = usecases::auth::login(
        state.users.as_ref(),
        &state.tokens,
        &login_data.email,
        &login_data.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthResponse { access_token }))
}
