use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Exercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    /// Kilograms
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable fields of an exercise, replaced wholesale on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseFields {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}
