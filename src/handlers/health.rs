use axum::{extract::State, http::StatusCode, Json};

use crate::dto::{HealthResponse, ReadyzChecks, ReadyzResponse};
use crate::AppState;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "moodzone-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyzResponse>) {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    if db_ok {
        (
            StatusCode::OK,
            Json(ReadyzResponse {
                status: "ready",
                checks: ReadyzChecks { database: "ok" },
            }),
        )
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyzResponse {
                status: "not_ready",
                checks: ReadyzChecks { database: "failed" },
            }),
        )
    }
}
