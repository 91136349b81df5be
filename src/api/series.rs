use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::history::sql_literal;
use super::{ApiError, AppState};
use crate::db::{ReleaseCountryRow, SeriesChildren, SeriesOverviewRow};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct SeriesListItem {
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "SNAME")]
    pub sname: String,
    #[serde(rename = "NEPISODES")]
    pub nepisodes: i32,
    #[serde(rename = "ORI_LANG")]
    pub ori_lang: String,
    pub avg_rating: Option<f64>,
    pub genres: Vec<String>,
}

impl From<SeriesOverviewRow> for SeriesListItem {
    fn from(row: SeriesOverviewRow) -> Self {
        Self {
            sid: row.sid,
            sname: row.sname,
            nepisodes: row.nepisodes,
            ori_lang: row.ori_lang,
            avg_rating: row.avg_rating,
            genres: row.genres,
        }
    }
}

/// Detail shape backing the admin edit form: base columns plus every child
/// collection.
#[derive(Serialize)]
pub struct SeriesDetail {
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "SNAME")]
    pub sname: String,
    #[serde(rename = "NEPISODES")]
    pub nepisodes: i32,
    #[serde(rename = "ORI_LANG")]
    pub ori_lang: String,
    pub genres: Vec<String>,
    pub subtitles: Vec<String>,
    pub dubbings: Vec<String>,
    pub release_countries: Vec<ReleaseCountryItem>,
}

#[derive(Serialize)]
pub struct ReleaseCountryItem {
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
    #[serde(rename = "RELEASE_DATE")]
    pub release_date: NaiveDate,
}

impl From<ReleaseCountryRow> for ReleaseCountryItem {
    fn from(row: ReleaseCountryRow) -> Self {
        Self {
            cid: row.cid,
            cname: row.cname,
            release_date: row.release_date,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateSeriesPayload {
    pub sname: Option<String>,
    pub nepisodes: Option<i32>,
    pub ori_lang: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSeriesPayload {
    pub sname: String,
    pub nepisodes: i32,
    pub ori_lang: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub subtitles: Vec<String>,
    #[serde(default)]
    pub dubbings: Vec<String>,
    #[serde(default)]
    pub release_countries: Vec<ReleaseCountryPayload>,
}

#[derive(Deserialize)]
pub struct ReleaseCountryPayload {
    pub cid: i32,
    pub release_date: NaiveDate,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /admin/series
/// All series with live average rating and genre tags, newest first.
pub async fn list_series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SeriesListItem>>, ApiError> {
    let rows = state.store().list_series_overview().await?;
    Ok(Json(rows.into_iter().map(SeriesListItem::from).collect()))
}

/// POST /admin/series
pub async fn create_series(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<CreateSeriesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(sname), Some(nepisodes), Some(ori_lang)) = (
        non_empty(payload.sname),
        payload.nepisodes.filter(|&n| n != 0),
        non_empty(payload.ori_lang),
    ) else {
        return Err(ApiError::bad_request("Missing series information"));
    };

    let sid = state
        .store()
        .create_series(sname.clone(), nepisodes, ori_lang.clone())
        .await?;

    let sql = format!(
        "INSERT INTO DRY_SERIES (SNAME, NEPISODES, ORI_LANG) VALUES ({}, {nepisodes}, {})",
        sql_literal(&sname),
        sql_literal(&ori_lang),
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_SERIES", "INSERT", &sql)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Series created successfully", "sid": sid })),
    ))
}

/// GET /admin/series/{sid}
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<i32>,
) -> Result<Json<SeriesDetail>, ApiError> {
    let series = state
        .store()
        .get_series(sid)
        .await?
        .ok_or_else(|| ApiError::not_found("Series not found"))?;

    let genres = state.store().series_genres(sid).await?;
    let subtitles = state.store().series_subtitles(sid).await?;
    let dubbings = state.store().series_dubbings(sid).await?;
    let release_countries = state
        .store()
        .series_release_countries(sid)
        .await?
        .into_iter()
        .map(ReleaseCountryItem::from)
        .collect();

    Ok(Json(SeriesDetail {
        sid: series.sid,
        sname: series.sname,
        nepisodes: series.nepisodes,
        ori_lang: series.ori_lang,
        genres,
        subtitles,
        dubbings,
        release_countries,
    }))
}

/// PUT /admin/series/{sid}
/// Replaces the base fields and all four child collections.
pub async fn update_series(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(sid): Path<i32>,
    Json(payload): Json<UpdateSeriesPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let UpdateSeriesPayload {
        sname,
        nepisodes,
        ori_lang,
        genres,
        subtitles,
        dubbings,
        release_countries,
    } = payload;

    let children = SeriesChildren {
        genres,
        subtitles,
        dubbings,
        release_countries: release_countries
            .iter()
            .map(|rc| (rc.cid, rc.release_date))
            .collect(),
    };

    let updated = state
        .store()
        .update_series(sid, sname.clone(), nepisodes, ori_lang.clone(), children)
        .await?;
    if !updated {
        return Err(ApiError::not_found("Series not found"));
    }

    let sql = format!(
        "UPDATE DRY_SERIES SET SNAME = {}, NEPISODES = {nepisodes}, ORI_LANG = {} WHERE SID = {sid}",
        sql_literal(&sname),
        sql_literal(&ori_lang),
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_SERIES", "UPDATE", &sql)
        .await;

    Ok(Json(
        json!({ "message": format!("Series {sid} updated successfully.") }),
    ))
}

/// DELETE /admin/series/{sid}
/// Removes the series and every dependent row.
pub async fn delete_series(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(sid): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store().delete_series(sid).await?;
    if !deleted {
        return Err(ApiError::not_found("Series not found"));
    }

    let sql = format!("DELETE FROM DRY_SERIES WHERE SID = {sid}");
    state
        .history_service()
        .record(admin.user_id, "DRY_SERIES", "DELETE", &sql)
        .await;

    Ok(Json(json!({
        "message": format!("Series {sid} and all related data deleted successfully.")
    })))
}
