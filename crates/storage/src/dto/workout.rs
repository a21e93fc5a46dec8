use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::exercise::ExerciseResponse;
use crate::models::WorkoutWithExercises;

/// Request payload for logging a new workout
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWorkoutRequest {
    /// RFC3339 timestamp with offset, e.g. `2024-01-15T10:00:00Z`
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub notes: String,
}

/// Request payload for updating a workout.
///
/// `notes` always replaces the stored value; omitting it clears the notes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkoutRequest {
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub notes: String,
}

/// A workout with its exercises embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub exercises: Vec<ExerciseResponse>,
}

const INVALID_DATE: &str = "invalid date format, use RFC3339";

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, &'static str> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| INVALID_DATE)
}

impl CreateWorkoutRequest {
    pub fn parse_date(&self) -> Result<DateTime<Utc>, &'static str> {
        parse_rfc3339(&self.date)
    }
}

impl UpdateWorkoutRequest {
    /// An absent or empty date leaves the stored date untouched.
    pub fn parse_date(&self) -> Result<Option<DateTime<Utc>>, &'static str> {
        match self.date.as_deref() {
            None | Some("") => Ok(None),
            Some(date) => parse_rfc3339(date).map(Some),
        }
    }
}

impl From<WorkoutWithExercises> for WorkoutResponse {
    fn from(detail: WorkoutWithExercises) -> Self {
        let WorkoutWithExercises { workout, exercises } = detail;
        Self {
            id: workout.id,
            user_id: workout.user_id,
            date: workout.date,
            notes: workout.notes,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
            exercises: exercises.into_iter().map(ExerciseResponse::from).collect(),
        }
    }
}
