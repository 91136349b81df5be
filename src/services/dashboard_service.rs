//! Dashboard aggregation: the stats snapshot and the two monthly growth
//! series. Everything here is recomputed fresh per request; averages come
//! from live feedback rows and are never stored.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors specific to dashboard aggregation.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One top-rated series entry. The average is transmitted un-rounded;
/// rounding is a display concern.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopSeriesEntry {
    #[serde(rename = "SNAME")]
    pub sname: String,
    pub avg_rating: f64,
}

/// The dashboard snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_series: u64,
    pub total_viewers: u64,
    pub total_feedback: u64,
    /// Feedback rows dated within the trailing 7 days, boundary inclusive.
    pub recent_feedback: u64,
    pub top_series: Vec<TopSeriesEntry>,
}

/// One viewer-growth bucket: a calendar month with at least one signup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GrowthPoint {
    pub month: String,
    pub new_viewers: u64,
}

/// One revenue-growth bucket. `revenue_total` is the running sum of
/// `revenue_new` over all months up to and including this one.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RevenuePoint {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue_new: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue_total: Decimal,
}

/// Domain service trait for the dashboard rollups.
#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    /// Assembles the stats snapshot: entity counts, the trailing-7-day
    /// feedback count, and the top 5 series by average rating (ties broken
    /// by series id ascending; series without feedback never appear).
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Database`] on store failures.
    async fn stats(&self) -> Result<DashboardStats, DashboardError>;

    /// Monthly signup counts, ascending by month key; months without
    /// signups are omitted.
    async fn viewer_growth(&self) -> Result<Vec<GrowthPoint>, DashboardError>;

    /// Monthly new revenue plus the cumulative total, ascending by month
    /// key. Sums accumulate in `Decimal`, not floats.
    async fn revenue_growth(&self) -> Result<Vec<RevenuePoint>, DashboardError>;
}
