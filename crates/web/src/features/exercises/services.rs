use storage::{
    models::{Exercise, ExerciseFields},
    repository::WorkoutStore,
};
use uuid::Uuid;

use crate::error::WebResult;

/// Add an exercise to one of the caller's workouts
pub async fn add_exercise(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    workout_id: Uuid,
    fields: &ExerciseFields,
) -> WebResult<Exercise> {
    Ok(workouts.add_exercise(user_id, workout_id, fields).await?)
}

/// Replace every mutable field of an exercise
pub async fn update_exercise(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    exercise_id: Uuid,
    fields: &ExerciseFields,
) -> WebResult<Exercise> {
    Ok(workouts.update_exercise(user_id, exercise_id, fields).await?)
}

pub async fn delete_exercise(
    workouts: &dyn WorkoutStore,
    user_id: Uuid,
    exercise_id: Uuid,
) -> WebResult<()> {
    Ok(workouts.delete_exercise(user_id, exercise_id).await?)
}
