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
use crate::db::{CollaborationRow, ProducerInput, ProducerRow};

#[derive(Serialize)]
pub struct ProducerItem {
    #[serde(rename = "PID")]
    pub pid: i32,
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
    #[serde(rename = "PHONE")]
    pub phone: String,
    #[serde(rename = "EMAIL")]
    pub email: String,
    #[serde(rename = "CID")]
    pub cid: i32,
    #[serde(rename = "CNAME")]
    pub cname: String,
}

impl From<ProducerRow> for ProducerItem {
    fn from(row: ProducerRow) -> Self {
        Self {
            pid: row.pid,
            fname: row.fname,
            lname: row.lname,
            street: row.street,
            city: row.city,
            state: row.state,
            zipcode: row.zipcode,
            phone: row.phone,
            email: row.email,
            cid: row.cid,
            cname: row.cname,
        }
    }
}

#[derive(Deserialize)]
pub struct ProducerPayload {
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub phone: String,
    pub email: String,
    pub cid: i32,
}

impl From<ProducerPayload> for ProducerInput {
    fn from(payload: ProducerPayload) -> Self {
        Self {
            fname: payload.fname,
            lname: payload.lname,
            street: payload.street,
            city: payload.city,
            state: payload.state,
            zipcode: payload.zipcode,
            phone: payload.phone,
            email: payload.email,
            cid: payload.cid,
        }
    }
}

/// Collaboration rows carry a preformatted producer name for the admin table.
#[derive(Serialize)]
pub struct CollaborationItem {
    #[serde(rename = "PID")]
    pub pid: i32,
    #[serde(rename = "PHOUSE_ID")]
    pub phouse_id: i32,
    pub producer_name: String,
    pub phouse_name: String,
}

impl From<CollaborationRow> for CollaborationItem {
    fn from(row: CollaborationRow) -> Self {
        Self {
            pid: row.pid,
            phouse_id: row.phouse_id,
            producer_name: format!("{} {}", row.producer_fname, row.producer_lname),
            phouse_name: row.phouse_name,
        }
    }
}

#[derive(Deserialize)]
pub struct CollaborationPayload {
    pub pid: i32,
    pub phouse_id: i32,
}

fn insert_sql(input: &ProducerInput) -> String {
    format!(
        "INSERT INTO DRY_PRODUCER (FNAME, LNAME, STREET, CITY, STATE, ZIPCODE, PHONE, EMAIL, CID) \
         VALUES ({}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql_literal(&input.fname),
        sql_literal(&input.lname),
        sql_literal(&input.street),
        sql_literal(&input.city),
        sql_literal(&input.state),
        sql_literal(&input.zipcode),
        sql_literal(&input.phone),
        sql_literal(&input.email),
        input.cid,
    )
}

fn update_sql(pid: i32, input: &ProducerInput) -> String {
    format!(
        "UPDATE DRY_PRODUCER SET FNAME = {}, LNAME = {}, STREET = {}, CITY = {}, STATE = {}, \
         ZIPCODE = {}, PHONE = {}, EMAIL = {}, CID = {} WHERE PID = {pid}",
        sql_literal(&input.fname),
        sql_literal(&input.lname),
        sql_literal(&input.street),
        sql_literal(&input.city),
        sql_literal(&input.state),
        sql_literal(&input.zipcode),
        sql_literal(&input.phone),
        sql_literal(&input.email),
        input.cid,
    )
}

/// GET /admin/producers
pub async fn list_producers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProducerItem>>, ApiError> {
    let rows = state.store().list_producers().await?;
    Ok(Json(rows.into_iter().map(ProducerItem::from).collect()))
}

/// POST /admin/producers
pub async fn create_producer(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<ProducerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = ProducerInput::from(payload);
    let sql = insert_sql(&input);

    state.store().create_producer(input).await?;
    state
        .history_service()
        .record(admin.user_id, "DRY_PRODUCER", "INSERT", &sql)
        .await;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Producer created" }))))
}

/// PUT /admin/producers/{pid}
pub async fn update_producer(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(pid): Path<i32>,
    Json(payload): Json<ProducerPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = ProducerInput::from(payload);
    let sql = update_sql(pid, &input);

    let updated = state.store().update_producer(pid, input).await?;
    if !updated {
        return Err(ApiError::not_found("Producer not found"));
    }

    state
        .history_service()
        .record(admin.user_id, "DRY_PRODUCER", "UPDATE", &sql)
        .await;

    Ok(Json(json!({ "message": "Producer updated" })))
}

/// DELETE /admin/producers/{pid}
/// Collaborations referencing the producer go with it.
pub async fn delete_producer(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(pid): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store().delete_producer(pid).await?;
    if !deleted {
        return Err(ApiError::not_found("Producer not found"));
    }

    let sql = format!("DELETE FROM DRY_PRODUCER WHERE PID = {pid}");
    state
        .history_service()
        .record(admin.user_id, "DRY_PRODUCER", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Producer deleted" })))
}

/// GET /admin/collaborations
pub async fn list_collaborations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CollaborationItem>>, ApiError> {
    let rows = state.store().list_collaborations().await?;
    Ok(Json(rows.into_iter().map(CollaborationItem::from).collect()))
}

/// POST /admin/collaborations
pub async fn add_collaboration(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<CollaborationPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let added = state
        .store()
        .add_collaboration(payload.pid, payload.phouse_id)
        .await?;
    if !added {
        return Err(ApiError::conflict("Collaboration already exists"));
    }

    let sql = format!(
        "INSERT INTO DRY_COLLABORATION (PID, PHOUSE_ID) VALUES ({}, {})",
        payload.pid, payload.phouse_id,
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_COLLABORATION", "INSERT", &sql)
        .await;

    Ok(Json(json!({ "message": "Collaboration added" })))
}

/// DELETE /admin/collaborations
pub async fn remove_collaboration(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<CollaborationPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state
        .store()
        .remove_collaboration(payload.pid, payload.phouse_id)
        .await?;
    if !removed {
        return Err(ApiError::not_found("Collaboration not found"));
    }

    let sql = format!(
        "DELETE FROM DRY_COLLABORATION WHERE PID = {} AND PHOUSE_ID = {}",
        payload.pid, payload.phouse_id,
    );
    state
        .history_service()
        .record(admin.user_id, "DRY_COLLABORATION", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Collaboration removed" })))
}
