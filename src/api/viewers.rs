use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::history::sql_literal;
use super::{ApiError, AppState};
use crate::db::{ViewerAdminRow, ViewerAdminUpdate, ViewerProfileRow};

#[derive(Serialize)]
pub struct ViewerListItem {
    #[serde(rename = "ACCOUNT")]
    pub account: i32,
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "FNAME")]
    pub fname: String,
    #[serde(rename = "LNAME")]
    pub lname: String,
    #[serde(rename = "CITY")]
    pub city: String,
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "OPEN_DATE")]
    pub open_date: NaiveDate,
    #[serde(rename = "MCHARGE")]
    pub mcharge: f64,
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
    pub feedback_count: i64,
}

impl From<ViewerAdminRow> for ViewerListItem {
    fn from(row: ViewerAdminRow) -> Self {
        Self {
            account: row.account,
            username: row.username,
            fname: row.fname,
            lname: row.lname,
            city: row.city,
            state: row.state,
            open_date: row.open_date,
            mcharge: row.mcharge,
            cid: row.cid,
            cname: row.cname,
            feedback_count: row.feedback_count,
        }
    }
}

#[derive(Serialize)]
pub struct ViewerDetail {
    #[serde(rename = "ACCOUNT")]
    pub account: i32,
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "FNAME")]
    pub fname: String,
    #[serde(rename = "LNAME")]
    pub lname: String,
    #[serde(rename = "STREET")]
    pub street: String,
    #[serde(rename = "CITY")]
    pub city: String,
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "ZIPCODE")]
    pub zipcode: String,
    #[serde(rename = "OPEN_DATE")]
    pub open_date: NaiveDate,
    #[serde(rename = "MCHARGE")]
    pub mcharge: f64,
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
}

impl From<ViewerProfileRow> for ViewerDetail {
    fn from(row: ViewerProfileRow) -> Self {
        Self {
            account: row.account,
            username: row.username,
            fname: row.fname,
            lname: row.lname,
            street: row.street,
            city: row.city,
            state: row.state,
            zipcode: row.zipcode,
            open_date: row.open_date,
            mcharge: row.mcharge,
            cid: row.cid,
            cname: row.cname,
        }
    }
}

#[derive(Deserialize)]
pub struct ViewerUpdatePayload {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub mcharge: f64,
    pub cid: i32,
}

/// GET /admin/viewers
pub async fn list_viewers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ViewerListItem>>, ApiError> {
    let rows = state.store().list_viewers_admin().await?;
    Ok(Json(rows.into_iter().map(ViewerListItem::from).collect()))
}

/// GET /admin/viewers/{account}
pub async fn get_viewer(
    State(state): State<Arc<AppState>>,
    Path(account): Path<i32>,
) -> Result<Json<ViewerDetail>, ApiError> {
    let profile = state
        .store()
        .get_viewer_profile(account)
        .await?
        .ok_or_else(|| ApiError::not_found("Viewer not found"))?;
    Ok(Json(ViewerDetail::from(profile)))
}

/// PUT /admin/viewers/{account}
/// Admins adjust address, monthly charge and country; credentials stay
/// untouched.
pub async fn update_viewer(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(account): Path<i32>,
    Json(payload): Json<ViewerUpdatePayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let update = ViewerAdminUpdate {
        street: payload.street,
        city: payload.city,
        state: payload.state,
        zipcode: payload.zipcode,
        mcharge: payload.mcharge,
        cid: payload.cid,
    };
    let sql = format!(
        "UPDATE DRY_VIEWER SET STREET = {}, CITY = {}, STATE = {}, ZIPCODE = {}, \
         MCHARGE = {}, CID = {} WHERE ACCOUNT = {account}",
        sql_literal(&update.street),
        sql_literal(&update.city),
        sql_literal(&update.state),
        sql_literal(&update.zipcode),
        update.mcharge,
        update.cid,
    );

    let updated = state
        .store()
        .update_viewer_admin_fields(account, update)
        .await?;
    if !updated {
        return Err(ApiError::not_found("Viewer not found"));
    }

    state
        .history_service()
        .record(admin.user_id, "DRY_VIEWER", "UPDATE", &sql)
        .await;

    Ok(Json(json!({ "message": "Viewer updated" })))
}
