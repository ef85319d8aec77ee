use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::dto::CalendarQuery;
use crate::error::{AppError, AppResult};
use crate::models::mood_log::{CreateMoodLogRequest, MoodLog, MoodLogQuery, UpdateMoodLogRequest};
use crate::services::aggregation::{self, MonthSummary};
use crate::AppState;

pub async fn create_mood_log(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodLogRequest>,
) -> AppResult<Json<MoodLog>> {
    body.validate()?;

    let now = Utc::now();
    let log_date = body.date.unwrap_or_else(|| now.date_naive());
    let log_time = body.time.unwrap_or_else(|| now.time());

    // Derived fields are computed here and only here
    let classification = body.classification();

    let log = sqlx::query_as::<_, MoodLog>(
        r#"
        INSERT INTO student_mood_logs (
            id, student_id, impact, joyfulness, calculated_emotion, calculated_zone,
            log_date, log_time, feeling_description, add_note, category_id, subcategory_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.student_id)
    .bind(body.impact)
    .bind(body.pleasantness)
    .bind(classification.emotion)
    .bind(classification.zone)
    .bind(log_date)
    .bind(log_time)
    .bind(&body.feeling_description)
    .bind(&body.add_note)
    .bind(body.category_id)
    .bind(body.subcategory_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        student_id = %log.student_id,
        mood_log_id = %log.id,
        emotion = %log.calculated_emotion,
        zone = %log.calculated_zone,
        "Mood logged"
    );

    Ok(Json(log))
}

pub async fn list_mood_logs(
    State(state): State<AppState>,
    Query(query): Query<MoodLogQuery>,
) -> AppResult<Json<Vec<MoodLog>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    if start > end {
        return Err(AppError::Validation(
            "startDate must not be after endDate".into(),
        ));
    }

    let logs = sqlx::query_as::<_, MoodLog>(
        r#"
        SELECT * FROM student_mood_logs
        WHERE student_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date DESC, log_time DESC
        "#,
    )
    .bind(query.student_id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(logs))
}

/// Time-boxed edit. Changing either rating rewrites emotion and zone together.
pub async fn update_mood_log(
    State(state): State<AppState>,
    Path(mood_log_id): Path<Uuid>,
    Json(body): Json<UpdateMoodLogRequest>,
) -> AppResult<Json<MoodLog>> {
    body.validate()?;

    let existing = sqlx::query_as::<_, MoodLog>("SELECT * FROM student_mood_logs WHERE id = $1")
        .bind(mood_log_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Mood log not found".into()))?;

    let window = state.config.mood_edit_window();
    if let Err(e) = existing.authorize_edit(body.student_id, Utc::now(), window) {
        tracing::warn!(
            mood_log_id = %mood_log_id,
            deadline = ?existing.edit_deadline(window),
            error = %e,
            "Rejected mood log edit"
        );
        return Err(e);
    }

    let ratings = body.rating_update(&existing);

    let log = sqlx::query_as::<_, MoodLog>(
        r#"
        UPDATE student_mood_logs SET
            impact = $3,
            joyfulness = $4,
            calculated_emotion = $5,
            calculated_zone = $6,
            feeling_description = COALESCE($7, feeling_description),
            add_note = COALESCE($8, add_note),
            category_id = COALESCE($9, category_id),
            subcategory_id = COALESCE($10, subcategory_id),
            updated_at = NOW()
        WHERE id = $1 AND student_id = $2
        RETURNING *
        "#,
    )
    .bind(mood_log_id)
    .bind(body.student_id)
    .bind(ratings.impact)
    .bind(ratings.pleasantness)
    .bind(&ratings.calculated_emotion)
    .bind(ratings.calculated_zone)
    .bind(&body.feeling_description)
    .bind(&body.add_note)
    .bind(body.category_id)
    .bind(body.subcategory_id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        student_id = %log.student_id,
        mood_log_id = %log.id,
        zone = %log.calculated_zone,
        "Mood log edited"
    );

    Ok(Json(log))
}

/// Calendar view: per-day zone tallies plus the month's totals and mode.
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<MonthSummary>> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let (start, end) = aggregation::month_bounds(year, month)
        .ok_or_else(|| AppError::Validation("month must be between 1 and 12".into()))?;

    let logs = sqlx::query_as::<_, MoodLog>(
        r#"
        SELECT * FROM student_mood_logs
        WHERE student_id = $1 AND log_date BETWEEN $2 AND $3
        ORDER BY log_date ASC, log_time ASC
        "#,
    )
    .bind(query.student_id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let summary = aggregation::month_summary(year, month, &logs)
        .ok_or_else(|| AppError::Validation("month must be between 1 and 12".into()))?;

    Ok(Json(summary))
}
