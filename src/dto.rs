//! # MoodZone — Request/Response DTOs
//!
//! API contract types that are not stored rows. Mood-log rows and their
//! request bodies live in `models::mood_log`.
//!
//! Conventions:
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Mood-facing JSON is camelCase, matching the stored mood-log shape

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::emotion::{self, Classification, EmotionCell, Zone};

// ============================================================================
// Emotions & zones
// ============================================================================

/// One cell of GET /api/emotions
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionResponse {
    pub impact: i32,
    pub pleasantness: i32,
    pub emotion: &'static str,
    pub zone: Zone,
    pub color: &'static str,
    pub icon: &'static str,
}

impl EmotionResponse {
    pub fn from_cell(impact: i32, pleasantness: i32, cell: &'static EmotionCell) -> Self {
        Self {
            impact,
            pleasantness,
            emotion: cell.name,
            zone: cell.zone,
            color: cell.color,
            icon: cell.icon,
        }
    }
}

/// One entry of GET /api/zones
#[derive(Debug, Serialize)]
pub struct ZoneResponse {
    pub zone: Zone,
    pub color: &'static str,
}

/// GET /api/emotions/classify query params. Parsed wide so any integer
/// reaches `classify` and comes back as the fallback when off the grid.
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub impact: i64,
    pub pleasantness: i64,
}

impl ClassifyQuery {
    pub fn classification(&self) -> Classification {
        match (i32::try_from(self.impact), i32::try_from(self.pleasantness)) {
            (Ok(impact), Ok(pleasantness)) => emotion::classify(impact, pleasantness),
            _ => Classification::FALLBACK,
        }
    }
}

/// Input-time feedback for the mood form. Off-grid ratings come back as the
/// `Unknown` / Yellow fallback with neutral presentation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub impact: i64,
    pub pleasantness: i64,
    pub emotion: &'static str,
    pub zone: Zone,
    pub emotion_color: &'static str,
    pub zone_color: &'static str,
    pub icon: &'static str,
    pub known: bool,
}

impl ClassifyResponse {
    pub fn new(impact: i64, pleasantness: i64, classification: Classification) -> Self {
        Self {
            impact,
            pleasantness,
            emotion: classification.emotion,
            zone: classification.zone,
            emotion_color: emotion::emotion_color(classification.emotion),
            zone_color: emotion::zone_color(classification.zone.as_str()),
            icon: emotion::emotion_icon(classification.emotion),
            known: classification.is_known(),
        }
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// GET /api/student-mood-logs/calendar query params
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub student_id: Uuid,
    /// Default: current year
    pub year: Option<i32>,
    /// 1-12. Default: current month
    pub month: Option<u32>,
}

// ============================================================================
// System
// ============================================================================

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /readyz
#[derive(Debug, Serialize)]
pub struct ReadyzResponse {
    pub status: &'static str,
    pub checks: ReadyzChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyzChecks {
    pub database: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::emotion::classify;

    #[test]
    fn test_classify_response_known() {
        let resp = ClassifyResponse::new(4, 6, classify(4, 6));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["emotion"], "Joyful");
        assert_eq!(json["zone"], "Blue");
        assert_eq!(json["zoneColor"], "#3b82f6");
        assert_eq!(json["icon"], "😄");
        assert_eq!(json["known"], true);
    }

    #[test]
    fn test_classify_response_fallback_is_neutral() {
        let resp = ClassifyResponse::new(0, 1, classify(0, 1));
        assert_eq!(resp.emotion, "Unknown");
        assert_eq!(resp.zone, Zone::Yellow);
        assert_eq!(resp.emotion_color, emotion::NEUTRAL_COLOR);
        assert_eq!(resp.icon, emotion::NEUTRAL_ICON);
        assert!(!resp.known);
    }

    #[test]
    fn test_classify_query_beyond_i32_falls_back() {
        let query = ClassifyQuery {
            impact: 3_000_000_000,
            pleasantness: 4,
        };
        assert_eq!(query.classification(), Classification::FALLBACK);

        let resp = ClassifyResponse::new(query.impact, query.pleasantness, query.classification());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["impact"], 3_000_000_000i64);
        assert_eq!(json["zone"], "Yellow");
        assert_eq!(json["known"], false);
    }

    #[test]
    fn test_classify_query_on_grid() {
        let query = ClassifyQuery {
            impact: 4,
            pleasantness: 6,
        };
        assert_eq!(query.classification(), classify(4, 6));
    }

    #[test]
    fn test_calendar_query_optional_month() {
        let json = format!(r#"{{"studentId":"{}"}}"#, Uuid::nil());
        let query: CalendarQuery = serde_json::from_str(&json).unwrap();
        assert!(query.year.is_none());
        assert!(query.month.is_none());
    }
}
