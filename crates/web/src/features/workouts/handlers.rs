use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutResponse};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use crate::error::WebError;
use crate::tokens::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/v1/workouts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's workouts, most recent first", body = Vec<WorkoutResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workouts"
)]
pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutResponse>>, WebError> {
    let workouts = services::list_workouts(state.workouts.as_ref(), user.user_id).await?;

    let response: Vec<WorkoutResponse> = workouts
        .into_iter()
        .map(WorkoutResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/workouts",
    request_body = CreateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workouts"
)]
pub async fn create_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<CreateWorkoutRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let workout = services::create_workout(state.workouts.as_ref(), user.user_id, &req).await?;
    tracing::info!(workout_id = %workout.workout.id, user_id = %user.user_id, "Created workout");

    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(workout))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout found", body = WorkoutResponse),
        (status = 400, description = "Malformed ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn get_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
) -> Result<Response, WebError> {
    let workout = services::get_workout(state.workouts.as_ref(), user.user_id, id).await?;

    Ok(Json(WorkoutResponse::from(workout)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/v1/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    request_body = UpdateWorkoutRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn update_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateWorkoutRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_workout(state.workouts.as_ref(), user.user_id, id, &req).await?;

    Ok(Json(WorkoutResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/v1/workouts/{id}",
    params(
        ("id" = Uuid, Path, description = "Workout ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Workout and its exercises deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts"
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
) -> Result<Response, WebError> {
    services::delete_workout(state.workouts.as_ref(), user.user_id, id).await?;
    tracing::info!(workout_id = %id, user_id = %user.user_id, "Deleted workout");

    Ok(StatusCode::NO_CONTENT.into_response())
}
