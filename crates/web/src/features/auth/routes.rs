use axum::{Router, routing::post};

use super::handlers::{login, register};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
