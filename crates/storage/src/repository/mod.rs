use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Exercise, ExerciseFields, NewUser, User, Workout, WorkoutWithExercises};

pub mod user;
pub mod workout;

pub use user::UserRepository;
pub use workout::WorkoutRepository;

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StorageError::ConstraintViolation`](crate::error::StorageError)
    /// when the email is already registered.
    async fn create(&self, user: &NewUser) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Persistence for workouts and their exercises.
///
/// Every operation is scoped to `user_id`; a workout or exercise owned by
/// another user is reported as [`StorageError::NotFound`](crate::error::StorageError).
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Most recent workout first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<WorkoutWithExercises>>;

    async fn create(&self, user_id: Uuid, date: DateTime<Utc>, notes: &str) -> Result<Workout>;

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<WorkoutWithExercises>;

    /// Replaces `notes` unconditionally and `date` only when given.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: Option<DateTime<Utc>>,
        notes: &str,
    ) -> Result<WorkoutWithExercises>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()>;

    async fn add_exercise(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise>;

    async fn update_exercise(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise>;

    async fn delete_exercise(&self, user_id: Uuid, exercise_id: Uuid) -> Result<()>;
}
