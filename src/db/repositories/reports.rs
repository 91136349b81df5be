use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue, Statement};

/// Executes the canned analytical queries verbatim. Rows come back as JSON
/// objects keyed by the statement's own column names, since the report
/// tables render those keys directly.
pub struct ReportRepository {
    conn: DatabaseConnection,
}

impl ReportRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn run(&self, sql: &str) -> Result<Vec<JsonValue>> {
        let backend = self.conn.get_database_backend();
        let rows =
            JsonValue::find_by_statement(Statement::from_string(backend, sql.to_string()))
                .all(&self.conn)
                .await
                .with_context(|| format!("Report query failed: {sql}"))?;

        Ok(rows)
    }
}
