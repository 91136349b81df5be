use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::history::sql_literal;
use super::{ApiError, AppState};
use crate::db::{StudioInput, StudioRow};

#[derive(Serialize)]
pub struct StudioItem {
    #[serde(rename = "PHOUSE_ID")]
    pub phouse_id: i32,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "STREET")]
    pub street: String,
    #[serde(rename = "CITY")]
    pub city: String,
    #[serde(rename = "STATE")]
    pub state: String,
    #[serde(rename = "ZIPCODE")]
    pub zipcode: String,
    #[serde(rename = "EST_YEAR")]
    pub est_year: i32,
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
}

impl From<StudioRow> for StudioItem {
    fn from(row: StudioRow) -> Self {
        Self {
            phouse_id: row.phouse_id,
            name: row.name,
            street: row.street,
            city: row.city,
            state: row.state,
            zipcode: row.zipcode,
            est_year: row.est_year,
            cid: row.cid,
            cname: row.cname,
        }
    }
}

#[derive(Deserialize)]
pub struct StudioPayload {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub est_year: i32,
    pub cid: i32,
}

impl From<StudioPayload> for StudioInput {
    fn from(payload: StudioPayload) -> Self {
        Self {
            name: payload.name,
            street: payload.street,
            city: payload.city,
            state: payload.state,
            zipcode: payload.zipcode,
            est_year: payload.est_year,
            cid: payload.cid,
        }
    }
}

fn insert_sql(input: &StudioInput) -> String {
    format!(
        "INSERT INTO DRY_PHOUSE (NAME, STREET, CITY, STATE, ZIPCODE, EST_YEAR, CID) \
         VALUES ({}, {}, {}, {}, {}, {}, {})",
        sql_literal(&input.name),
        sql_literal(&input.street),
        sql_literal(&input.city),
        sql_literal(&input.state),
        sql_literal(&input.zipcode),
        input.est_year,
        input.cid,
    )
}

fn update_sql(phouse_id: i32, input: &StudioInput) -> String {
    format!(
        "UPDATE DRY_PHOUSE SET NAME = {}, STREET = {}, CITY = {}, STATE = {}, ZIPCODE = {}, \
         EST_YEAR = {}, CID = {} WHERE PHOUSE_ID = {phouse_id}",
        sql_literal(&input.name),
        sql_literal(&input.street),
        sql_literal(&input.city),
        sql_literal(&input.state),
        sql_literal(&input.zipcode),
        input.est_year,
        input.cid,
    )
}

/// GET /admin/phouses
pub async fn list_phouses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StudioItem>>, ApiError> {
    let rows = state.store().list_phouses().await?;
    Ok(Json(rows.into_iter().map(StudioItem::from).collect()))
}

/// POST /admin/phouses
pub async fn create_phouse(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<StudioPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = StudioInput::from(payload);
    let sql = insert_sql(&input);

    state.store().create_phouse(input).await?;
    state
        .history_service()
        .record(admin.user_id, "DRY_PHOUSE", "INSERT", &sql)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Production house created" })),
    ))
}

/// PUT /admin/phouses/{phouse_id}
pub async fn update_phouse(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(phouse_id): Path<i32>,
    Json(payload): Json<StudioPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = StudioInput::from(payload);
    let sql = update_sql(phouse_id, &input);

    let updated = state.store().update_phouse(phouse_id, input).await?;
    if !updated {
        return Err(ApiError::not_found("Production house not found"));
    }

    state
        .history_service()
        .record(admin.user_id, "DRY_PHOUSE", "UPDATE", &sql)
        .await;

    Ok(Json(json!({ "message": "Production house updated" })))
}

/// DELETE /admin/phouses/{phouse_id}
/// Refused while contracts still reference the house.
pub async fn delete_phouse(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(phouse_id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let contracts = state.store().phouse_contract_count(phouse_id).await?;
    if contracts > 0 {
        return Err(ApiError::bad_request(
            "Cannot delete production house with active contracts",
        ));
    }

    let deleted = state.store().delete_phouse(phouse_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Production house not found"));
    }

    let sql = format!("DELETE FROM DRY_PHOUSE WHERE PHOUSE_ID = {phouse_id}");
    state
        .history_service()
        .record(admin.user_id, "DRY_PHOUSE", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Production house deleted" })))
}
