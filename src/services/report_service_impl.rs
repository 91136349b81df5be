//! `SeaORM` implementation of the `ReportService` trait.

use crate::db::Store;
use crate::services::report_service::{CannedReport, ReportError, ReportOutput, ReportService};
use async_trait::async_trait;

pub struct SeaOrmReportService {
    store: Store,
}

impl SeaOrmReportService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportService for SeaOrmReportService {
    async fn run(&self, report: CannedReport) -> Result<ReportOutput, ReportError> {
        let sql = report.sql().trim();
        let result = self.store.run_report(sql).await?;

        Ok(ReportOutput {
            query: sql.to_string(),
            result,
        })
    }
}
