use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Exercise, ExerciseFields};

/// Request payload for adding or replacing an exercise
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExerciseRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(range(min = 0, message = "Sets cannot be negative"))]
    pub sets: i32,

    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(range(min = 0, message = "Reps cannot be negative"))]
    pub reps: i32,

    /// Kilograms
    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExerciseRequest> for ExerciseFields {
    fn from(req: ExerciseRequest) -> Self {
        Self {
            name: req.name,
            sets: req.sets,
            reps: req.reps,
            weight: req.weight,
        }
    }
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            workout_id: exercise.workout_id,
            name: exercise.name,
            sets: exercise.sets,
            reps: exercise.reps,
            weight: exercise.weight,
            created_at: exercise.created_at,
            updated_at: exercise.updated_at,
        }
    }
}
