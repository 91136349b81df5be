use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::HistoryEntry;

/// GET /admin/history
/// The full audit trail, newest first.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.history_service().list().await?;
    Ok(Json(entries))
}

/// Quotes a string value for the recorded SQL text. Embedded single
/// quotes are doubled.
pub(super) fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
