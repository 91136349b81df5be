use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::{CannedReport, ReportOutput};

/// GET /admin/reports/{key}
/// Run one canned report (`q1`..`q6`); the response carries the SQL text
/// alongside the rows.
pub async fn run_report(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<ReportOutput>, ApiError> {
    let report = CannedReport::from_key(&key)
        .ok_or_else(|| ApiError::not_found(format!("Unknown report: {key}")))?;

    let output = state.report_service().run(report).await?;

    Ok(Json(output))
}
