//! `SeaORM` implementation of the `HistoryService` trait.

use async_trait::async_trait;
use tracing::error;

use crate::db::Store;
use crate::services::history_service::{HistoryEntry, HistoryError, HistoryService};

pub struct SeaOrmHistoryService {
    store: Store,
}

impl SeaOrmHistoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HistoryService for SeaOrmHistoryService {
    async fn record(&self, admin_id: i32, target_table: &str, action_type: &str, sql_text: &str) {
        if let Err(e) = self
            .store
            .append_history(admin_id, target_table, action_type, sql_text)
            .await
        {
            error!(
                admin_id,
                target_table, action_type, "Failed to append admin history row: {e}"
            );
        }
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let rows = self.store.list_history().await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
