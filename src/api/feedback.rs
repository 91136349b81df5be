use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, AppState};
use crate::db::{FeedbackFilter, ModerationRow, OwnFeedbackRow, SeriesFeedbackRow};
use crate::entities::feedback;

// ============================================================================
// Admin moderation
// ============================================================================

#[derive(Deserialize)]
pub struct ModerationQuery {
    pub sid: Option<i32>,
    pub rating: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ModerationItem {
    #[serde(rename = "ACCOUNT")]
    pub account: i32,
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "FNAME")]
    pub fname: String,
    #[serde(rename = "LNAME")]
    pub lname: String,
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "SNAME")]
    pub sname: String,
    #[serde(rename = "RATE")]
    pub rate: i32,
    #[serde(rename = "FTEXT")]
    pub ftext: String,
    #[serde(rename = "FDATE")]
    pub fdate: NaiveDate,
}

impl From<ModerationRow> for ModerationItem {
    fn from(row: ModerationRow) -> Self {
        Self {
            account: row.account,
            username: row.username,
            fname: row.fname,
            lname: row.lname,
            sid: row.sid,
            sname: row.sname,
            rate: row.rate,
            ftext: row.ftext,
            fdate: row.fdate,
        }
    }
}

#[derive(Deserialize)]
pub struct RemoveFeedbackPayload {
    pub account: Option<i32>,
    pub sid: Option<i32>,
}

/// GET /admin/feedback
/// Filters are conjunctive; absent parameters match everything.
pub async fn list_all_feedback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ModerationQuery>,
) -> Result<Json<Vec<ModerationItem>>, ApiError> {
    let filter = FeedbackFilter {
        sid: query.sid,
        rating: query.rating,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let rows = state.store().list_feedback_moderation(&filter).await?;
    Ok(Json(rows.into_iter().map(ModerationItem::from).collect()))
}

/// DELETE /admin/feedback
pub async fn remove_feedback(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<RemoveFeedbackPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (Some(account), Some(sid)) = (
        payload.account.filter(|&n| n != 0),
        payload.sid.filter(|&n| n != 0),
    ) else {
        return Err(ApiError::bad_request("account and sid are required"));
    };

    let deleted = state.store().delete_feedback(account, sid).await?;
    if !deleted {
        return Err(ApiError::not_found("Feedback not found"));
    }

    let sql = format!("DELETE FROM DRY_FEEDBACK WHERE ACCOUNT = {account} AND SID = {sid}");
    state
        .history_service()
        .record(admin.user_id, "DRY_FEEDBACK", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Feedback deleted" })))
}

// ============================================================================
// Viewer feedback
// ============================================================================

#[derive(Serialize)]
pub struct SeriesFeedbackItem {
    #[serde(rename = "ACCOUNT")]
    pub account: i32,
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "FNAME")]
    pub fname: String,
    #[serde(rename = "LNAME")]
    pub lname: String,
    #[serde(rename = "RATE")]
    pub rate: i32,
    #[serde(rename = "FTEXT")]
    pub ftext: String,
    #[serde(rename = "FDATE")]
    pub fdate: NaiveDate,
}

impl From<SeriesFeedbackRow> for SeriesFeedbackItem {
    fn from(row: SeriesFeedbackRow) -> Self {
        Self {
            account: row.account,
            username: row.username,
            fname: row.fname,
            lname: row.lname,
            rate: row.rate,
            ftext: row.ftext,
            fdate: row.fdate,
        }
    }
}

#[derive(Serialize)]
pub struct FeedbackStats {
    pub avg_rating: Option<f64>,
    pub feedback_count: i64,
}

#[derive(Serialize)]
pub struct SeriesFeedbackResponse {
    pub feedback_list: Vec<SeriesFeedbackItem>,
    pub stats: FeedbackStats,
    pub user_feedback: Option<feedback::Model>,
}

/// Rate arrives as a raw JSON value so non-integer ratings are rejected
/// rather than truncated.
#[derive(Deserialize)]
pub struct SubmitFeedbackPayload {
    pub rate: Option<serde_json::Value>,
    pub ftext: Option<String>,
}

#[derive(Serialize)]
pub struct OwnFeedbackItem {
    #[serde(rename = "SNAME")]
    pub sname: String,
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "RATE")]
    pub rate: i32,
    #[serde(rename = "FTEXT")]
    pub ftext: String,
    #[serde(rename = "FDATE")]
    pub fdate: NaiveDate,
}

impl From<OwnFeedbackRow> for OwnFeedbackItem {
    fn from(row: OwnFeedbackRow) -> Self {
        Self {
            sname: row.sname,
            sid: row.sid,
            rate: row.rate,
            ftext: row.ftext,
            fdate: row.fdate,
        }
    }
}

/// GET /viewer/series/{sid}/feedback
pub async fn series_feedback(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
    Path(sid): Path<i32>,
) -> Result<Json<SeriesFeedbackResponse>, ApiError> {
    let rows = state.store().feedback_for_series(sid).await?;
    let (avg_rating, feedback_count) = state.store().feedback_stats_for_series(sid).await?;
    let user_feedback = state.store().get_feedback(viewer.user_id, sid).await?;

    Ok(Json(SeriesFeedbackResponse {
        feedback_list: rows.into_iter().map(SeriesFeedbackItem::from).collect(),
        stats: FeedbackStats {
            avg_rating,
            feedback_count,
        },
        user_feedback,
    }))
}

/// POST /viewer/series/{sid}/feedback
/// Creates the caller's feedback row or overwrites the existing one; either
/// way `FDATE` becomes today.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
    Path(sid): Path<i32>,
    Json(payload): Json<SubmitFeedbackPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rate = payload
        .rate
        .as_ref()
        .and_then(serde_json::Value::as_i64)
        .filter(|r| (1..=5).contains(r))
        .and_then(|r| i32::try_from(r).ok());
    let ftext = payload.ftext.filter(|t| t.chars().count() >= 5);
    let (Some(rate), Some(ftext)) = (rate, ftext) else {
        return Err(ApiError::bad_request(
            "Invalid input. Rate must be 1-5 and text must be at least 5 characters.",
        ));
    };

    state
        .store()
        .get_series(sid)
        .await?
        .ok_or_else(|| ApiError::not_found("Series not found"))?;

    let today = Local::now().date_naive();
    state
        .store()
        .upsert_feedback(viewer.user_id, sid, rate, ftext, today)
        .await?;

    Ok(Json(json!({ "message": "Feedback submitted successfully" })))
}

/// DELETE /viewer/series/{sid}/feedback
pub async fn delete_own_feedback(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
    Path(sid): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store().delete_feedback(viewer.user_id, sid).await?;
    if !deleted {
        return Err(ApiError::not_found("No feedback found to delete"));
    }
    Ok(Json(json!({ "message": "Feedback deleted successfully" })))
}

/// GET /viewer/my-feedback
pub async fn my_feedback(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
) -> Result<Json<Vec<OwnFeedbackItem>>, ApiError> {
    let rows = state.store().feedback_for_viewer(viewer.user_id).await?;
    Ok(Json(rows.into_iter().map(OwnFeedbackItem::from).collect()))
}
