use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodzone_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let api_routes = Router::new()
        // Emotion grid
        .route("/api/emotions", get(handlers::emotions::list_emotions))
        .route("/api/emotions/classify", get(handlers::emotions::classify))
        .route("/api/zones", get(handlers::emotions::list_zones))
        // Mood logs
        .route(
            "/api/student-mood-logs",
            post(handlers::mood_logs::create_mood_log),
        )
        .route(
            "/api/student-mood-logs",
            get(handlers::mood_logs::list_mood_logs),
        )
        .route(
            "/api/student-mood-logs/calendar",
            get(handlers::mood_logs::get_calendar),
        )
        .route(
            "/api/student-mood-logs/:id",
            put(handlers::mood_logs::update_mood_log),
        );

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<axum::http::HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
}
