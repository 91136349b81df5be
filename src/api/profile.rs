use axum::{Extension, Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, AppState};
use crate::db::ViewerProfileRow;
use crate::services::ChangePasswordInput;

#[derive(Serialize)]
pub struct ProfileResponse {
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

impl From<ViewerProfileRow> for ProfileResponse {
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
pub struct UpdateProfilePayload {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub cid: Option<i32>,
}

#[derive(Deserialize)]
pub struct ChangePasswordPayload {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub security_answer: Option<String>,
}

/// GET /viewer/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state
        .store()
        .get_viewer_profile(viewer.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// PUT /viewer/profile
/// Address and country only; name, charge and credentials are not
/// self-service.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(street), Some(city), Some(state_field), Some(zipcode), Some(cid)) = (
        non_empty(payload.street),
        non_empty(payload.city),
        non_empty(payload.state),
        non_empty(payload.zipcode),
        payload.cid.filter(|&cid| cid != 0),
    ) else {
        return Err(ApiError::bad_request(
            "All address fields and country are required.",
        ));
    };

    let updated = state
        .store()
        .update_viewer_profile(viewer.user_id, street, city, state_field, zipcode, cid)
        .await?;
    if !updated {
        return Err(ApiError::not_found("Profile not found"));
    }

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}

/// POST /viewer/change-password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(old_password), Some(new_password), Some(security_answer)) = (
        non_empty(payload.old_password),
        non_empty(payload.new_password),
        non_empty(payload.security_answer),
    ) else {
        return Err(ApiError::bad_request(
            "Old password, security answer and new password are required",
        ));
    };

    state
        .auth_service()
        .change_password(
            viewer.user_id,
            ChangePasswordInput {
                old_password,
                new_password,
                security_answer,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// GET /viewer/security-question
pub async fn security_question(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let question = state
        .auth_service()
        .security_question(viewer.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Security question not set"))?;
    Ok(Json(json!({ "security_question": question })))
}
