use std::sync::Arc;

use axum::Router;
use storage::repository::{UserStore, WorkoutStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod routes;
pub mod tokens;

use tokens::TokenService;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub tokens: TokenService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::workouts::handlers::list_workouts,
        features::workouts::handlers::create_workout,
        features::workouts::handlers::get_workout,
        features::workouts::handlers::update_workout,
        features::workouts::handlers::delete_workout,
        features::exercises::handlers::add_exercise,
        features::exercises::handlers::update_exercise,
        features::exercises::handlers::delete_exercise,
    ),
    components(
        schemas(
            storage::dto::auth::RegisterRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::UserResponse,
            storage::dto::auth::TokenResponse,
            storage::dto::workout::CreateWorkoutRequest,
            storage::dto::workout::UpdateWorkoutRequest,
            storage::dto::workout::WorkoutResponse,
            storage::dto::exercise::ExerciseRequest,
            storage::dto::exercise::ExerciseResponse,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "workouts", description = "The caller's workouts"),
        (name = "exercises", description = "Exercises logged within a workout"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", routes::routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
