use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::services::{DashboardStats, GrowthPoint, RevenuePoint};

/// GET /admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.dashboard_service().stats().await?;
    Ok(Json(stats))
}

/// GET /admin/viewer-growth
/// Monthly signup counts, ascending by month.
pub async fn viewer_growth(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GrowthPoint>>, ApiError> {
    let series = state.dashboard_service().viewer_growth().await?;
    Ok(Json(series))
}

/// GET /admin/revenue-growth
/// Monthly new revenue with a cumulative running total.
pub async fn revenue_growth(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RevenuePoint>>, ApiError> {
    let series = state.dashboard_service().revenue_growth().await?;
    Ok(Json(series))
}
