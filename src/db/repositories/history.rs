use anyhow::Result;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

use crate::entities::{admin, admin_history, prelude::*};

/// Audit row joined with the acting admin's display name.
#[derive(Debug, Clone, FromQueryResult)]
pub struct HistoryRow {
    pub hid: i64,
    pub admin_id: i32,
    pub admin_fname: String,
    pub admin_lname: String,
    pub action_ts: String,
    pub target_table: String,
    pub action_type: String,
    pub sql_text: String,
}

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn append(
        &self,
        admin_id: i32,
        target_table: &str,
        action_type: &str,
        sql_text: &str,
    ) -> Result<()> {
        let active = admin_history::ActiveModel {
            admin_id: Set(admin_id),
            action_ts: Set(chrono::Utc::now().to_rfc3339()),
            target_table: Set(target_table.to_string()),
            action_type: Set(action_type.to_string()),
            sql_text: Set(sql_text.to_string()),
            ..Default::default()
        };

        AdminHistory::insert(active).exec(&self.conn).await?;
        Ok(())
    }

    /// Full audit trail, newest row first.
    pub async fn list(&self) -> Result<Vec<HistoryRow>> {
        let rows = AdminHistory::find()
            .select_only()
            .column_as(admin_history::Column::Hid, "hid")
            .column_as(admin_history::Column::AdminId, "admin_id")
            .column_as(admin::Column::Fname, "admin_fname")
            .column_as(admin::Column::Lname, "admin_lname")
            .column_as(admin_history::Column::ActionTs, "action_ts")
            .column_as(admin_history::Column::TargetTable, "target_table")
            .column_as(admin_history::Column::ActionType, "action_type")
            .column_as(admin_history::Column::SqlText, "sql_text")
            .join(JoinType::InnerJoin, admin_history::Relation::Admin.def())
            .order_by_desc(admin_history::Column::Hid)
            .into_model::<HistoryRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
