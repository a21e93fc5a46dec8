#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use storage::{
    error::{Result, StorageError},
    models::{Exercise, ExerciseFields, NewUser, User, Workout, WorkoutWithExercises},
    repository::{UserStore, WorkoutStore},
};
use tower::ServiceExt;
use uuid::Uuid;
use web::{AppState, app, config::AuthConfig, tokens::TokenService};

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    workouts: Vec<Workout>,
    exercises: Vec<Exercise>,
}

/// In-process stand-in for Postgres with the same ownership rules.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn exercise_count(&self) -> usize {
        self.tables.lock().unwrap().exercises.len()
    }

    fn owns(tables: &Tables, user_id: Uuid, workout_id: Uuid) -> bool {
        tables
            .workouts
            .iter()
            .any(|w| w.id == workout_id && w.user_id == user_id)
    }

    fn detail(tables: &Tables, workout: Workout) -> WorkoutWithExercises {
        let exercises = tables
            .exercises
            .iter()
            .filter(|e| e.workout_id == workout.id)
            .cloned()
            .collect();
        WorkoutWithExercises { workout, exercises }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StorageError::ConstraintViolation(
                "email may already exist".to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl WorkoutStore for InMemoryStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<WorkoutWithExercises>> {
        let tables = self.tables.lock().unwrap();
        let mut workouts: Vec<Workout> = tables
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Ok(workouts
            .into_iter()
            .map(|w| Self::detail(&tables, w))
            .collect())
    }

    async fn create(&self, user_id: Uuid, date: DateTime<Utc>, notes: &str) -> Result<Workout> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            date,
            notes: notes.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<WorkoutWithExercises> {
        let tables = self.tables.lock().unwrap();
        let workout = tables
            .workouts
            .iter()
            .find(|w| w.id == id && w.user_id == user_id)
            .cloned()
            .ok_or(StorageError::NotFound)?;
        Ok(Self::detail(&tables, workout))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        date: Option<DateTime<Utc>>,
        notes: &str,
    ) -> Result<WorkoutWithExercises> {
        let mut tables = self.tables.lock().unwrap();
        let workout = tables
            .workouts
            .iter_mut()
            .find(|w| w.id == id && w.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        if let Some(date) = date {
            workout.date = date;
        }
        workout.notes = notes.to_string();
        workout.updated_at = Utc::now();

        let workout = workout.clone();
        Ok(Self::detail(&tables, workout))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        if !Self::owns(&tables, user_id, id) {
            return Err(StorageError::NotFound);
        }
        tables.workouts.retain(|w| w.id != id);
        tables.exercises.retain(|e| e.workout_id != id);
        Ok(())
    }

    async fn add_exercise(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise> {
        let mut tables = self.tables.lock().unwrap();
        if !Self::owns(&tables, user_id, workout_id) {
            return Err(StorageError::NotFound);
        }

        let now = Utc::now();
        let exercise = Exercise {
            id: Uuid::new_v4(),
            workout_id,
            name: fields.name.clone(),
            sets: fields.sets,
            reps: fields.reps,
            weight: fields.weight,
            created_at: now,
            updated_at: now,
        };
        tables.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn update_exercise(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        fields: &ExerciseFields,
    ) -> Result<Exercise> {
        let mut tables = self.tables.lock().unwrap();
        let workout_id = tables
            .exercises
            .iter()
            .find(|e| e.id == exercise_id)
            .map(|e| e.workout_id)
            .ok_or(StorageError::NotFound)?;
        if !Self::owns(&tables, user_id, workout_id) {
            return Err(StorageError::NotFound);
        }

        let exercise = tables
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or(StorageError::NotFound)?;
        exercise.name = fields.name.clone();
        exercise.sets = fields.sets;
        exercise.reps = fields.reps;
        exercise.weight = fields.weight;
        exercise.updated_at = Utc::now();
        Ok(exercise.clone())
    }

    async fn delete_exercise(&self, user_id: Uuid, exercise_id: Uuid) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let owned = tables
            .exercises
            .iter()
            .find(|e| e.id == exercise_id)
            .is_some_and(|e| Self::owns(&tables, user_id, e.workout_id));
        if !owned {
            return Err(StorageError::NotFound);
        }
        tables.exercises.retain(|e| e.id != exercise_id);
        Ok(())
    }
}

/// A backend whose every workout query fails, for exercising the 500 path.
pub struct BrokenWorkoutStore;

#[async_trait]
impl WorkoutStore for BrokenWorkoutStore {
    async fn list(&self, _: Uuid) -> Result<Vec<WorkoutWithExercises>> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _: Uuid, _: DateTime<Utc>, _: &str) -> Result<Workout> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _: Uuid, _: Uuid) -> Result<WorkoutWithExercises> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(
        &self,
        _: Uuid,
        _: Uuid,
        _: Option<DateTime<Utc>>,
        _: &str,
    ) -> Result<WorkoutWithExercises> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _: Uuid, _: Uuid) -> Result<()> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn add_exercise(&self, _: Uuid, _: Uuid, _: &ExerciseFields) -> Result<Exercise> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update_exercise(&self, _: Uuid, _: Uuid, _: &ExerciseFields) -> Result<Exercise> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete_exercise(&self, _: Uuid, _: Uuid) -> Result<()> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub fn auth_config(secret: Option<&str>) -> AuthConfig {
    AuthConfig {
        jwt_secret: secret.map(str::to_string),
        token_ttl_hours: 72,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_secret(Some(SECRET))
    }

    pub fn with_secret(secret: Option<&str>) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let tokens = TokenService::new(&auth_config(secret));
        let router = app(AppState {
            users: store.clone(),
            workouts: store.clone(),
            tokens: tokens.clone(),
        });

        Self {
            router,
            store,
            tokens,
        }
    }

    pub fn with_workout_store(workouts: Arc<dyn WorkoutStore>) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let tokens = TokenService::new(&auth_config(Some(SECRET)));
        let router = app(AppState {
            users: store.clone(),
            workouts,
            tokens: tokens.clone(),
        });

        Self {
            router,
            store,
            tokens,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(serde_json::json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register and log in, returning the bearer token.
    pub async fn sign_up(&self, email: &str) -> String {
        let (status, _) = self.register("Test User", email, "password123").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(email, "password123").await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_workout(&self, token: &str, date: &str, notes: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/workouts",
                Some(token),
                Some(serde_json::json!({ "date": date, "notes": notes })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}
