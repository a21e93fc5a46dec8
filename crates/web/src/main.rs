use std::sync::Arc;

use anyhow::Context;
use storage::{
    Database,
    repository::{UserRepository, WorkoutRepository},
};
use web::{AppState, app, config::Config, tokens::TokenService};

fn init_tracing(release_mode: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if release_mode {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load API configuration")?;
    init_tracing(config.release_mode);

    tracing::info!("Starting FitTrack API");
    if config.auth.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; logins will fail until it is configured");
    }

    tracing::info!(
        "Connecting to database at: {}",
        config.database.display_target()
    );
    let db = Database::new(config.database.connect_options()?)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        users: Arc::new(UserRepository::new(db.pool().clone())),
        workouts: Arc::new(WorkoutRepository::new(db.pool().clone())),
        tokens: TokenService::new(&config.auth),
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
