use axum::{Router, routing::put};

use super::handlers::{delete_exercise, update_exercise};
use crate::AppState;

/// Protected routes; the caller mounts them behind the auth gate.
pub fn routes() -> Router<AppState> {
    Router::new().route("/:id", put(update_exercise).delete(delete_exercise))
}
