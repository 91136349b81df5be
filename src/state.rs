use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DashboardService, HistoryService, ReportService, SeaOrmAuthService,
    SeaOrmDashboardService, SeaOrmHistoryService, SeaOrmReportService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub report_service: Arc<dyn ReportService>,

    pub dashboard_service: Arc<dyn DashboardService>,

    pub auth_service: Arc<dyn AuthService>,

    pub history_service: Arc<dyn HistoryService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let security = config.security.clone();
        let config_arc = Arc::new(RwLock::new(config));

        let report_service =
            Arc::new(SeaOrmReportService::new(store.clone())) as Arc<dyn ReportService>;
        let dashboard_service =
            Arc::new(SeaOrmDashboardService::new(store.clone())) as Arc<dyn DashboardService>;
        let auth_service =
            Arc::new(SeaOrmAuthService::new(store.clone(), security)) as Arc<dyn AuthService>;
        let history_service =
            Arc::new(SeaOrmHistoryService::new(store.clone())) as Arc<dyn HistoryService>;

        Ok(Self {
            config: config_arc,
            store,
            report_service,
            dashboard_service,
            auth_service,
            history_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
