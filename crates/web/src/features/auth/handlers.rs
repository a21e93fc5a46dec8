use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::dto::auth::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use validator::Validate;

use crate::AppState;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error or email already registered")
    ),
    tag = "auth"
)]
#[tracing::instrument(name = "HTTP: Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, WebError>,
) -> Result<Response, WebError> {
    let req = req.normalized();
    req.validate()?;

    let user = services::register(state.users.as_ref(), &req).await?;
    tracing::info!(user_id = %user.id, "Registered new user");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Token signing is not configured")
    ),
    tag = "auth"
)]
#[tracing::instrument(name = "HTTP: Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, WebError>,
) -> Result<Response, WebError> {
    let req = req.normalized();
    req.validate()?;

    let token = services::login(state.users.as_ref(), &state.tokens, &req).await?;

    Ok(Json(TokenResponse { token }).into_response())
}
