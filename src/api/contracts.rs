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
use crate::db::{ContractInput, ContractRow};

#[derive(Serialize)]
pub struct ContractItem {
    #[serde(rename = "CONTRACT_ID")]
    pub contract_id: i32,
    #[serde(rename = "ISSUED_DATE")]
    pub issued_date: NaiveDate,
    #[serde(rename = "EPISODE_PRICE")]
    pub episode_price: f64,
    #[serde(rename = "IS_RENEW")]
    pub is_renew: Option<String>,
    #[serde(rename = "PHOUSE_ID")]
    pub phouse_id: i32,
    pub phouse_name: String,
    #[serde(rename = "SID")]
    pub sid: i32,
    #[serde(rename = "SNAME")]
    pub sname: String,
}

impl From<ContractRow> for ContractItem {
    fn from(row: ContractRow) -> Self {
        Self {
            contract_id: row.contract_id,
            issued_date: row.issued_date,
            episode_price: row.episode_price,
            is_renew: row.is_renew,
            phouse_id: row.phouse_id,
            phouse_name: row.phouse_name,
            sid: row.sid,
            sname: row.sname,
        }
    }
}

#[derive(Deserialize)]
pub struct ContractPayload {
    pub issued_date: NaiveDate,
    pub episode_price: f64,
    pub is_renew: Option<String>,
    pub phouse_id: i32,
    pub sid: i32,
}

impl From<ContractPayload> for ContractInput {
    fn from(payload: ContractPayload) -> Self {
        Self {
            issued_date: payload.issued_date,
            episode_price: payload.episode_price,
            is_renew: payload.is_renew,
            phouse_id: payload.phouse_id,
            sid: payload.sid,
        }
    }
}

fn renew_literal(is_renew: Option<&str>) -> String {
    is_renew.map_or_else(|| "NULL".to_string(), sql_literal)
}

fn insert_sql(input: &ContractInput) -> String {
    format!(
        "INSERT INTO DRY_CONTRACT (ISSUED_DATE, EPISODE_PRICE, IS_RENEW, PHOUSE_ID, SID) \
         VALUES ('{}', {}, {}, {}, {})",
        input.issued_date,
        input.episode_price,
        renew_literal(input.is_renew.as_deref()),
        input.phouse_id,
        input.sid,
    )
}

fn update_sql(contract_id: i32, input: &ContractInput) -> String {
    format!(
        "UPDATE DRY_CONTRACT SET ISSUED_DATE = '{}', EPISODE_PRICE = {}, IS_RENEW = {}, \
         PHOUSE_ID = {}, SID = {} WHERE CONTRACT_ID = {contract_id}",
        input.issued_date,
        input.episode_price,
        renew_literal(input.is_renew.as_deref()),
        input.phouse_id,
        input.sid,
    )
}

/// GET /admin/contracts
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContractItem>>, ApiError> {
    let rows = state.store().list_contracts().await?;
    Ok(Json(rows.into_iter().map(ContractItem::from).collect()))
}

/// POST /admin/contracts
pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<ContractPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = ContractInput::from(payload);
    let sql = insert_sql(&input);

    state.store().create_contract(input).await?;
    state
        .history_service()
        .record(admin.user_id, "DRY_CONTRACT", "INSERT", &sql)
        .await;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Contract created" }))))
}

/// PUT /admin/contracts/{contract_id}
pub async fn update_contract(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(contract_id): Path<i32>,
    Json(payload): Json<ContractPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let input = ContractInput::from(payload);
    let sql = update_sql(contract_id, &input);

    let updated = state.store().update_contract(contract_id, input).await?;
    if !updated {
        return Err(ApiError::not_found("Contract not found"));
    }

    state
        .history_service()
        .record(admin.user_id, "DRY_CONTRACT", "UPDATE", &sql)
        .await;

    Ok(Json(json!({ "message": "Contract updated" })))
}

/// DELETE /admin/contracts/{contract_id}
pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    Path(contract_id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.store().delete_contract(contract_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Contract not found"));
    }

    let sql = format!("DELETE FROM DRY_CONTRACT WHERE CONTRACT_ID = {contract_id}");
    state
        .history_service()
        .record(admin.user_id, "DRY_CONTRACT", "DELETE", &sql)
        .await;

    Ok(Json(json!({ "message": "Contract deleted" })))
}
