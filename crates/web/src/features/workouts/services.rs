use storage::{
    dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest},
    models::WorkoutWithExercises,
    repository::WorkoutStore,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// List the caller's workouts, most recent first
pub async fn list_workouts(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
) -> WebResult<Vec<WorkoutWithExercises>> {
    Ok(workouts.list(user_id).await?)
}

/// Log a new workout for the caller
pub async fn create_workout(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    request: &CreateWorkoutRequest,
) -> WebResult<WorkoutWithExercises> {
    let date = request
        .parse_date()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let workout = workouts.create(user_id, date, &request.notes).await?;

    Ok(WorkoutWithExercises {
        workout,
        exercises: Vec::new(),
    })
}

/// Get one of the caller's workouts
pub async fn get_workout(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    id: Uuid,
) -> WebResult<WorkoutWithExercises> {
    Ok(workouts.find(user_id, id).await?)
}

/// Update one of the caller's workouts
pub async fn update_workout(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    id: Uuid,
    request: &UpdateWorkoutRequest,
) -> WebResult<WorkoutWithExercises> {
    let date = request
        .parse_date()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(workouts.update(user_id, id, date, &request.notes).await?)
}

/// Delete one of the caller's workouts along with its exercises
pub async fn delete_workout(workouts: &dyn WorkoutStore, user_id: Uuid, id: Uuid) -> WebResult<()> {
    Ok(workouts.delete(user_id, id).await?)
}
