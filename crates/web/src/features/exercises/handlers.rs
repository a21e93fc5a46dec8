use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::{
    dto::exercise::{ExerciseRequest, ExerciseResponse},
    models::ExerciseFields,
};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebError;
use crate::tokens::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/v1/workouts/{id}/exercises",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    request_body = ExerciseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Exercise added", body = ExerciseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "exercises"
)]
pub async fn add_exercise(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(workout_id), _): WithRejection<Path<Uuid>, WebError>,
    WithRejection(Json(req), _): WithRejection<Json<ExerciseRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let exercise = services::add_exercise(
        state.workouts.as_ref(),
        user.user_id,
        workout_id,
        &ExerciseFields::from(req),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ExerciseResponse::from(exercise))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/exercises/{id}",
    params(
        ("id" = Uuid, Path, description = "Exercise ID")
    ),
    request_body = ExerciseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Exercise replaced", body = ExerciseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn update_exercise(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    WithRejection(Json(req), _): WithRejection<Json<ExerciseRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let exercise = services::update_exercise(
        state.workouts.as_ref(),
        user.user_id,
        id,
        &ExerciseFields::from(req),
    )
    .await?;

    Ok(Json(ExerciseResponse::from(exercise)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(
        ("id" = Uuid, Path, description = "Exercise ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Exercise not found")
    ),
    tag = "exercises"
)]
pub async fn delete_exercise(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
) -> Result<Response, WebError> {
    services::delete_exercise(state.workouts.as_ref(), user.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
