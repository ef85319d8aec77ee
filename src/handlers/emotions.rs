use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};

use crate::dto::{ClassifyQuery, ClassifyResponse, EmotionResponse, ZoneResponse};
use crate::error::AppResult;
use crate::services::emotion::{self, Zone};

pub async fn list_emotions() -> Json<Vec<EmotionResponse>> {
    let cells = emotion::catalog()
        .map(|(impact, pleasantness, cell)| EmotionResponse::from_cell(impact, pleasantness, cell))
        .collect();
    Json(cells)
}

pub async fn list_zones() -> Json<Vec<ZoneResponse>> {
    let zones = Zone::ALL
        .iter()
        .map(|&zone| ZoneResponse {
            zone,
            color: zone.color(),
        })
        .collect();
    Json(zones)
}

/// Live feedback while the student moves the sliders. Never fails on
/// off-grid ratings; the fallback classification is returned instead.
/// Non-numeric or missing ratings are a validation error.
pub async fn classify(
    query: Result<Query<ClassifyQuery>, QueryRejection>,
) -> AppResult<Json<ClassifyResponse>> {
    let Query(query) = query?;
    let classification = query.classification();
    if !classification.is_known() {
        tracing::debug!(
            impact = query.impact,
            pleasantness = query.pleasantness,
            "Ratings outside the emotion grid, returning fallback"
        );
    }
    Ok(Json(ClassifyResponse::new(
        query.impact,
        query.pleasantness,
        classification,
    )))
}
