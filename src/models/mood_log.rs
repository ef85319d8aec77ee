use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::emotion::{classify, Classification, Zone};

/// A stored mood log. `calculated_emotion` and `calculated_zone` always hold
/// `classify(impact, pleasantness)` as of the last rating change; they are
/// returned as stored and never recomputed on read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MoodLog {
    pub id: Uuid,
    pub student_id: Uuid,
    pub impact: i32,
    #[sqlx(rename = "joyfulness")]
    #[serde(rename = "joyfulness")]
    pub pleasantness: i32,
    pub calculated_emotion: String,
    pub calculated_zone: Zone,
    #[serde(rename = "date")]
    pub log_date: NaiveDate,
    #[serde(rename = "time")]
    pub log_time: NaiveTime,
    pub feeling_description: Option<String>,
    pub add_note: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodLog {
    /// `None` when the deadline lies past the last representable instant.
    pub fn edit_deadline(&self, window: Duration) -> Option<DateTime<Utc>> {
        self.created_at.checked_add_signed(window)
    }

    /// Edits are accepted strictly before `created_at + window`.
    pub fn is_editable(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.edit_deadline(window)
            .map_or(true, |deadline| now < deadline)
    }

    /// Ownership is checked before the edit window.
    pub fn authorize_edit(
        &self,
        student_id: Uuid,
        now: DateTime<Utc>,
        window: Duration,
    ) -> AppResult<()> {
        if self.student_id != student_id {
            return Err(AppError::Forbidden(
                "Mood log belongs to another student".into(),
            ));
        }
        if !self.is_editable(now, window) {
            return Err(AppError::Forbidden(
                "Mood log can no longer be edited".into(),
            ));
        }
        Ok(())
    }
}

/// POST /api/student-mood-logs
///
/// Any `calculatedEmotion` / `calculatedZone` sent by the client is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodLogRequest {
    pub student_id: Uuid,

    #[validate(range(min = 1, max = 7, message = "Impact must be between 1 and 7"))]
    pub impact: i32,

    #[serde(rename = "joyfulness")]
    #[validate(range(min = 1, max = 7, message = "Joyfulness must be between 1 and 7"))]
    pub pleasantness: i32,

    /// Default: today (UTC)
    pub date: Option<NaiveDate>,

    /// Default: now (UTC)
    pub time: Option<NaiveTime>,

    #[validate(length(max = 5000, message = "Description must be under 5000 characters"))]
    pub feeling_description: Option<String>,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub add_note: Option<String>,

    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
}

impl CreateMoodLogRequest {
    pub fn classification(&self) -> Classification {
        classify(self.impact, self.pleasantness)
    }
}

/// PUT /api/student-mood-logs/:id — partial update inside the edit window
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMoodLogRequest {
    pub student_id: Uuid,

    #[validate(range(min = 1, max = 7, message = "Impact must be between 1 and 7"))]
    pub impact: Option<i32>,

    #[serde(rename = "joyfulness")]
    #[validate(range(min = 1, max = 7, message = "Joyfulness must be between 1 and 7"))]
    pub pleasantness: Option<i32>,

    #[validate(length(max = 5000, message = "Description must be under 5000 characters"))]
    pub feeling_description: Option<String>,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub add_note: Option<String>,

    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
}

/// Ratings and derived fields to write back on an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingUpdate {
    pub impact: i32,
    pub pleasantness: i32,
    pub calculated_emotion: String,
    pub calculated_zone: Zone,
}

impl UpdateMoodLogRequest {
    /// Merge the requested ratings over the stored ones. When either rating
    /// is supplied both derived fields are recomputed together; otherwise the
    /// stored pair is carried over untouched.
    pub fn rating_update(&self, existing: &MoodLog) -> RatingUpdate {
        if self.impact.is_none() && self.pleasantness.is_none() {
            return RatingUpdate {
                impact: existing.impact,
                pleasantness: existing.pleasantness,
                calculated_emotion: existing.calculated_emotion.clone(),
                calculated_zone: existing.calculated_zone,
            };
        }

        let impact = self.impact.unwrap_or(existing.impact);
        let pleasantness = self.pleasantness.unwrap_or(existing.pleasantness);
        let classification = classify(impact, pleasantness);

        RatingUpdate {
            impact,
            pleasantness,
            calculated_emotion: classification.emotion.to_string(),
            calculated_zone: classification.zone,
        }
    }
}

/// GET /api/student-mood-logs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodLogQuery {
    pub student_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn sample_log(impact: i32, pleasantness: i32, log_date: NaiveDate) -> MoodLog {
        let classification = classify(impact, pleasantness);
        let created_at = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        MoodLog {
            id: Uuid::new_v4(),
            student_id: Uuid::nil(),
            impact,
            pleasantness,
            calculated_emotion: classification.emotion.to_string(),
            calculated_zone: classification.zone,
            log_date,
            log_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            feeling_description: None,
            add_note: None,
            category_id: None,
            subcategory_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn update(impact: Option<i32>, pleasantness: Option<i32>) -> UpdateMoodLogRequest {
        UpdateMoodLogRequest {
            student_id: Uuid::nil(),
            impact,
            pleasantness,
            feeling_description: None,
            add_note: None,
            category_id: None,
            subcategory_id: None,
        }
    }

    // ── Edit window ──────────────────────────────────────────────────────

    #[test]
    fn test_editable_inside_window() {
        let log = sample_log(4, 6, march(10));
        let now = log.created_at + Duration::hours(23);
        assert!(log.is_editable(now, Duration::hours(24)));
    }

    #[test]
    fn test_not_editable_at_deadline() {
        let log = sample_log(4, 6, march(10));
        let window = Duration::hours(24);
        let deadline = log.edit_deadline(window).unwrap();
        assert!(!log.is_editable(deadline, window));
        assert!(!log.is_editable(log.created_at + Duration::days(3), window));
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let log = sample_log(4, 6, march(10));
        let window = Duration::seconds(9_000_000_000_000);
        assert_eq!(log.edit_deadline(window), None);
        assert!(log.is_editable(Utc::now(), window));
    }

    // ── Edit authorization ───────────────────────────────────────────────

    fn forbidden_message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Forbidden(msg)) => msg,
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_edit_owner_inside_window() {
        let log = sample_log(4, 6, march(10));
        let now = log.created_at + Duration::hours(1);
        assert!(log
            .authorize_edit(log.student_id, now, Duration::hours(24))
            .is_ok());
    }

    #[test]
    fn test_authorize_edit_rejects_other_student() {
        let log = sample_log(4, 6, march(10));
        let now = log.created_at + Duration::hours(1);
        let msg = forbidden_message(log.authorize_edit(Uuid::new_v4(), now, Duration::hours(24)));
        assert_eq!(msg, "Mood log belongs to another student");
    }

    #[test]
    fn test_authorize_edit_rejects_closed_window() {
        let log = sample_log(4, 6, march(10));
        let now = log.created_at + Duration::hours(25);
        let msg = forbidden_message(log.authorize_edit(log.student_id, now, Duration::hours(24)));
        assert_eq!(msg, "Mood log can no longer be edited");
    }

    #[test]
    fn test_authorize_edit_checks_owner_before_window() {
        let log = sample_log(4, 6, march(10));
        let now = log.created_at + Duration::days(7);
        let msg = forbidden_message(log.authorize_edit(Uuid::new_v4(), now, Duration::hours(24)));
        assert_eq!(msg, "Mood log belongs to another student");
    }

    // ── Rating updates ───────────────────────────────────────────────────

    #[test]
    fn test_rating_update_recomputes_both_fields() {
        let log = sample_log(4, 6, march(10)); // Joyful / Blue
        let result = update(Some(7), None).rating_update(&log);
        assert_eq!(result.impact, 7);
        assert_eq!(result.pleasantness, 6);
        assert_eq!(result.calculated_emotion, "Inspired");
        assert_eq!(result.calculated_zone, Zone::Blue);

        let result = update(None, Some(1)).rating_update(&log);
        assert_eq!(result.calculated_emotion, "Disgusted");
        assert_eq!(result.calculated_zone, Zone::DarkRed);
    }

    #[test]
    fn test_rating_update_without_ratings_keeps_stored_pair() {
        let mut log = sample_log(4, 6, march(10));
        // Stored values are authoritative even if they disagree with the grid
        log.calculated_emotion = "Legacy".into();
        log.calculated_zone = Zone::Green;
        let result = update(None, None).rating_update(&log);
        assert_eq!(result.calculated_emotion, "Legacy");
        assert_eq!(result.calculated_zone, Zone::Green);
    }

    // ── Request validation ───────────────────────────────────────────────

    #[test]
    fn test_create_request_deserializes_joyfulness() {
        let json = format!(
            r#"{{"studentId":"{}","impact":4,"joyfulness":6,"calculatedEmotion":"Forged","calculatedZone":"Green"}}"#,
            Uuid::nil()
        );
        let req: CreateMoodLogRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.pleasantness, 6);
        assert!(req.validate().is_ok());
        assert_eq!(req.classification().emotion, "Joyful");
        assert_eq!(req.classification().zone, Zone::Blue);
    }

    #[test]
    fn test_create_request_rejects_out_of_range() {
        for (impact, joy) in [(0, 4), (8, 4), (4, 0), (4, 8)] {
            let json = format!(
                r#"{{"studentId":"{}","impact":{},"joyfulness":{}}}"#,
                Uuid::nil(),
                impact,
                joy
            );
            let req: CreateMoodLogRequest = serde_json::from_str(&json).unwrap();
            assert!(req.validate().is_err(), "{}-{} should be rejected", impact, joy);
        }
    }

    #[test]
    fn test_create_request_missing_student_fails() {
        let result = serde_json::from_str::<CreateMoodLogRequest>(r#"{"impact":4,"joyfulness":4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_rejects_out_of_range() {
        assert!(update(Some(0), None).validate().is_err());
        assert!(update(None, Some(9)).validate().is_err());
        assert!(update(Some(7), Some(1)).validate().is_ok());
    }

    #[test]
    fn test_mood_log_serializes_boundary_names() {
        let log = sample_log(1, 1, march(2));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["joyfulness"], 1);
        assert_eq!(json["calculatedEmotion"], "Depressed");
        assert_eq!(json["calculatedZone"], "Light Red");
        assert_eq!(json["date"], "2026-03-02");
        assert!(json.get("pleasantness").is_none());
    }
}
