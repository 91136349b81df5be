//! Append-only audit trail of admin mutations.

use serde::Serialize;
use thiserror::Error;

use crate::db::HistoryRow;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for HistoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for HistoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One audit entry. Column-named fields keep the casing the admin UI
/// renders verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "HID")]
    pub hid: i64,
    #[serde(rename = "ADMIN_ID")]
    pub admin_id: i32,
    pub admin_name: String,
    #[serde(rename = "ACTION_TS")]
    pub action_ts: String,
    #[serde(rename = "TARGET_TABLE")]
    pub target_table: String,
    #[serde(rename = "ACTION_TYPE")]
    pub action_type: String,
    #[serde(rename = "SQL_TEXT")]
    pub sql_text: String,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            hid: row.hid,
            admin_id: row.admin_id,
            admin_name: format!("{} {}", row.admin_fname, row.admin_lname),
            action_ts: row.action_ts,
            target_table: row.target_table,
            action_type: row.action_type,
            sql_text: row.sql_text,
        }
    }
}

#[async_trait::async_trait]
pub trait HistoryService: Send + Sync {
    /// Append one audit row. Best-effort: a failed write is logged and
    /// swallowed so the admin mutation it observes still succeeds.
    async fn record(&self, admin_id: i32, target_table: &str, action_type: &str, sql_text: &str);

    /// Full trail, newest row first.
    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
}
