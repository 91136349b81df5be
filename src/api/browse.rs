use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::{BrowseFilter, BrowseSeriesRow, CountryRef, ReleaseCountryRow};
use crate::entities::episode;
use crate::services::rank_top_series;

#[derive(Deserialize)]
pub struct BrowseQuery {
    pub genre: Option<String>,
    pub language: Option<String>,
    pub country: Option<i32>,
}

#[derive(Serialize)]
pub struct BrowseSeriesItem {
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "SNAME")]
    pub sname: String,
    #[serde(rename = "NEPISODES")]
    pub nepisodes: i32,
    #[serde(rename = "ORI_LANG")]
    pub ori_lang: String,
    pub genres: Vec<String>,
    pub countries: Vec<CountryItem>,
    pub avg_rating: Option<f64>,
    pub feedback_count: i64,
}

#[derive(Serialize)]
pub struct CountryItem {
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
}

impl From<CountryRef> for CountryItem {
    fn from(country: CountryRef) -> Self {
        Self {
            cid: country.cid,
            cname: country.cname,
        }
    }
}

impl From<BrowseSeriesRow> for BrowseSeriesItem {
    fn from(row: BrowseSeriesRow) -> Self {
        Self {
            sid: row.sid,
            sname: row.sname,
            nepisodes: row.nepisodes,
            ori_lang: row.ori_lang,
            genres: row.genres,
            countries: row
                .release_countries
                .into_iter()
                .map(CountryItem::from)
                .collect(),
            avg_rating: row.avg_rating,
            feedback_count: row.feedback_count,
        }
    }
}

/// Viewer-facing detail: no country ids, release dates only.
#[derive(Serialize)]
pub struct BrowseSeriesDetail {
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
    pub release_countries: Vec<ReleaseDateItem>,
    pub episodes: Vec<episode::Model>,
}

#[derive(Serialize)]
pub struct ReleaseDateItem {
    #[serde(rename = "CNAME")]
    pub cname: String,
    #[serde(rename = "RELEASE_DATE")]
    pub release_date: NaiveDate,
}

impl From<ReleaseCountryRow> for ReleaseDateItem {
    fn from(row: ReleaseCountryRow) -> Self {
        Self {
            cname: row.cname,
            release_date: row.release_date,
        }
    }
}

#[derive(Serialize)]
pub struct RecommendationItem {
    #[serde(rename = "SNAME")]
    pub sname: String,
    pub avg_rating: f64,
    pub feedback_count: i64,
}

/// GET /viewer/series
/// Catalog listing with optional conjunctive filters, ordered by name.
pub async fn list_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<BrowseSeriesItem>>, ApiError> {
    let filter = BrowseFilter {
        genre: query.genre.filter(|g| !g.is_empty()),
        language: query.language.filter(|l| !l.is_empty()),
        country: query.country,
    };
    let rows = state.store().browse_series(&filter).await?;
    Ok(Json(rows.into_iter().map(BrowseSeriesItem::from).collect()))
}

/// GET /viewer/series/{sid}
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<i32>,
) -> Result<Json<BrowseSeriesDetail>, ApiError> {
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
        .map(ReleaseDateItem::from)
        .collect();
    let episodes = state.store().episodes_for_series(sid).await?;

    Ok(Json(BrowseSeriesDetail {
        sid: series.sid,
        sname: series.sname,
        nepisodes: series.nepisodes,
        ori_lang: series.ori_lang,
        genres,
        subtitles,
        dubbings,
        release_countries,
        episodes,
    }))
}

/// GET /viewer/recommendations
/// Top 5 series by live average rating, ranked the same way the admin
/// dashboard ranks them.
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecommendationItem>>, ApiError> {
    let rows = state.store().series_rating_rows().await?;
    let ranked = rank_top_series(rows, 5)
        .into_iter()
        .map(|row| RecommendationItem {
            sname: row.sname,
            avg_rating: row.avg_rating,
            feedback_count: row.feedback_count,
        })
        .collect();
    Ok(Json(ranked))
}
