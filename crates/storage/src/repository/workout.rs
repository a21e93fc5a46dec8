use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::WorkoutStore;
use crate::error::{Result, StorageError};
use crate::models::{Exercise, ExerciseFields, Workout, WorkoutWithExercises};

/// Postgres-backed workout repository
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: PgPool,
}

impl WorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_workout(&self, user_id: Uuid, id: Uuid) -> Result<Workout> {
        sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, user_id, date, notes, created_at, updated_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn exercises_for(&self, workout_ids: &[Uuid]) -> Result<Vec<Exercise>> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, workout_id, name, sets, reps, weight, created_at, updated_at
            FROM exercises
            WHERE workout_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(workout_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(exercises)
    }

    async fn with_exercises(&self, workout: Workout) -> Result<WorkoutWithExercises> {
        let exercises = self.exercises_for(&[workout.id]).await?;
        Ok(WorkoutWithExercises { workout, exercises })
    }
}

#[async_trait]
impl WorkoutStore for WorkoutRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<WorkoutWithExercises>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, user_id, date, notes, created_at, updated_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
        let mut by_workout: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        for exercise in self.exercises_for(&ids).await? {
            by_workout
                .entry(exercise.workout_id)
                .or_default()
                .push(exercise);
        }

        Ok(workouts
            .into_iter()
            .map(|workout| WorkoutWithExercises {
                exercises: by_workout.remove(&workout.id).unwrap_or_default(),
                workout,
            })
            .collect())
    }

    async fn create(&self, user_id: Uuid, date: DateTime<Utc>, notes: &str) -> Result<Workout> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (user_id, date, notes)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, date, notes, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(workout)
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<WorkoutWithExercises> {
        let workout = self.find_workout(user_id, id).await?;
        self.with_exercises(workout).await
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: Option<DateTime<Utc>>,
        notes: &str,
    ) -> Result<WorkoutWithExercises> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            UPDATE workouts
            SET
                date = COALESCE($3, date),
                notes = $4,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, date, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(date)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        self.with_exercises(workout).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM workouts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn add_exercise(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise> {
        // The SELECT yields no row unless the workout belongs to the caller.
        sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (workout_id, name, sets, reps, weight)
            SELECT w.id, $3, $4, $5, $6
            FROM workouts w
            WHERE w.id = $1 AND w.user_id = $2
            RETURNING id, workout_id, name, sets, reps, weight, created_at, updated_at
            "#,
        )
        .bind(workout_id)
        .bind(user_id)
        .bind(&fields.name)
        .bind(fields.sets)
        .bind(fields.reps)
        .bind(fields.weight)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn update_exercise(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise> {
        sqlx::query_as::<_, Exercise>(
            r#"
            UPDATE exercises e
            SET
                name = $3,
                sets = $4,
                reps = $5,
                weight = $6,
                updated_at = now()
            FROM workouts w
            WHERE e.id = $1 AND e.workout_id = w.id AND w.user_id = $2
            RETURNING e.id, e.workout_id, e.name, e.sets, e.reps, e.weight,
                      e.created_at, e.updated_at
            "#,
        )
        .bind(exercise_id)
        .bind(user_id)
        .bind(&fields.name)
        .bind(fields.sets)
        .bind(fields.reps)
        .bind(fields.weight)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn delete_exercise(&self, user_id: Uuid, exercise_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM exercises e
            USING workouts w
            WHERE e.id = $1 AND e.workout_id = w.id AND w.user_id = $2
            "#,
        )
        .bind(exercise_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
