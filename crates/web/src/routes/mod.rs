use axum::{Router, middleware};

use crate::AppState;
use crate::features::{auth, exercises, workouts};
use crate::middleware::auth::require_auth;

/// Every API route, relative to the `/api/v1` prefix.
pub fn routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/workouts", workouts::routes::routes())
        .nest("/exercises", exercises::routes::routes())
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ));

    Router::new()
        .nest("/auth", auth::routes::routes())
        .merge(protected)
}
