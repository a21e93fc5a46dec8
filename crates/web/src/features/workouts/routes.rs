use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_workout, delete_workout, get_workout, list_workouts, update_workout};
use crate::AppState;
use crate::features::exercises::handlers::add_exercise;

/// Protected routes; the caller mounts them behind the auth gate.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route(
            "/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/:id/exercises", post(add_exercise))
}
