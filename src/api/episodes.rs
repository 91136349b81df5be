use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::history::sql_literal;
use super::{ApiError, AppState};
use crate::db::EpisodeInput;
use crate::entities::episode;

#[derive(Deserialize)]
pub struct AddEpisodePayload {
    pub e_num: Option<i32>,
    pub schedule_sdate: Option<NaiveDate>,
    pub schedule_edate: Option<NaiveDate>,
    pub nviewers: Option<i32>,
    pub interruption: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEpisodePayload {
    pub e_num: i32,
    pub schedule_sdate: NaiveDate,
    pub schedule_edate: NaiveDate,
    pub nviewers: i32,
    pub interruption: String,
}

/// GET /admin/series/{sid}/episodes
pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<i32>,
) -> Result<Json<Vec<episode::Model>>, ApiError> {
    state
        .store()
        .get_series(sid)
        .await?
        .ok_or_else(|| ApiError::not_found("Series not found"))?;

    let episodes = state.store().episodes_for_series(sid).await?;
    Ok(Json(episodes))
}

/// POST /admin/series/{sid}/episodes
pub async fn add_episode(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(sid): Path<i32>,
    Json(payload): Json<AddEpisodePayload>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store()
        .get_series(sid)
        .await?
        .ok_or_else(|| ApiError::not_found("Series not found"))?;

    let (Some(e_num), Some(schedule_sdate), Some(schedule_edate)) = (
        payload.e_num.filter(|&n| n != 0),
        payload.schedule_sdate,
        payload.schedule_edate,
    ) else {
        return Err(ApiError::bad_request("Missing episode data"));
    };

    let input = EpisodeInput {
        e_num,
        schedule_sdate,
        schedule_edate,
        nviewers: payload.nviewers.unwrap_or(0),
        interruption: payload.interruption.filter(|v| !v.is_empty()).unwrap_or_else(|| "N".to_string()),
    };

    state.store().create_episode(sid, input.clone()).await?;

    let sql = format!(
        "INSERT INTO DRY_EPISODE (E_NUM, SCHEDULE_SDATE, SCHEDULE_EDATE, NVIEWERS, SID, INTERRUPTION) \
         VALUES ({}, '{}', '{}', {}, {sid}, {})",
        input.e_num,
        input.schedule_sdate,
        input.schedule_edate,
        input.nviewers,
        sql_literal(&input.interruption),
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_EPISODE", "INSERT", &sql)
        .await;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Episode added" }))))
}

/// PUT /admin/episodes/{eid}
pub async fn update_episode(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(eid): Path<i32>,
    Json(payload): Json<UpdateEpisodePayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = EpisodeInput {
        e_num: payload.e_num,
        schedule_sdate: payload.schedule_sdate,
        schedule_edate: payload.schedule_edate,
        nviewers: payload.nviewers,
        interruption: payload.interruption,
    };

    let updated = state.store().update_episode(eid, input.clone()).await?;
    if !updated {
        return Err(ApiError::not_found("Episode not found"));
    }

    let sql = format!(
        "UPDATE DRY_EPISODE SET E_NUM = {}, SCHEDULE_SDATE = '{}', SCHEDULE_EDATE = '{}', \
         NVIEWERS = {}, INTERRUPTION = {} WHERE EID = {eid}",
        input.e_num,
        input.schedule_sdate,
        input.schedule_edate,
        input.nviewers,
        sql_literal(&input.interruption),
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_EPISODE", "UPDATE", &sql)
        .await;

    Ok(Json(json!({ "message": "Episode updated" })))
}

/// DELETE /admin/episodes/{eid}
pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(eid): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store().delete_episode(eid).await?;
    if !deleted {
        return Err(ApiError::not_found("Episode not found"));
    }

    let sql = format!("DELETE FROM DRY_EPISODE WHERE EID = {eid}");
    state
        .history_service()
        .record(admin.user_id, "DRY_EPISODE", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Episode deleted" })))
}
