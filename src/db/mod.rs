use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, JsonValue};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{admin, episode, feedback, series, viewer};

pub mod migrator;
pub mod repositories;

pub use repositories::accounts::{hash_password, verify_password, NewViewer};
pub use repositories::contracts::{ContractInput, ContractRow};
pub use repositories::episodes::EpisodeInput;
pub use repositories::feedback::{FeedbackFilter, ModerationRow, OwnFeedbackRow, SeriesFeedbackRow};
pub use repositories::history::HistoryRow;
pub use repositories::producers::{CollaborationRow, ProducerInput, ProducerRow};
pub use repositories::series::{
    BrowseFilter, BrowseSeriesRow, CountryRef, ReleaseCountryRow, SeriesChildren, SeriesOverviewRow,
};
pub use repositories::stats::SeriesRatingRow;
pub use repositories::studios::{StudioInput, StudioRow};
pub use repositories::viewers::{ViewerAdminRow, ViewerAdminUpdate, ViewerProfileRow};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn account_repo(&self) -> repositories::accounts::AccountRepository {
        repositories::accounts::AccountRepository::new(self.conn.clone())
    }

    fn series_repo(&self) -> repositories::series::SeriesRepository {
        repositories::series::SeriesRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episodes::EpisodeRepository {
        repositories::episodes::EpisodeRepository::new(self.conn.clone())
    }

    fn producer_repo(&self) -> repositories::producers::ProducerRepository {
        repositories::producers::ProducerRepository::new(self.conn.clone())
    }

    fn studio_repo(&self) -> repositories::studios::StudioRepository {
        repositories::studios::StudioRepository::new(self.conn.clone())
    }

    fn contract_repo(&self) -> repositories::contracts::ContractRepository {
        repositories::contracts::ContractRepository::new(self.conn.clone())
    }

    fn viewer_repo(&self) -> repositories::viewers::ViewerRepository {
        repositories::viewers::ViewerRepository::new(self.conn.clone())
    }

    fn feedback_repo(&self) -> repositories::feedback::FeedbackRepository {
        repositories::feedback::FeedbackRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn report_repo(&self) -> repositories::reports::ReportRepository {
        repositories::reports::ReportRepository::new(self.conn.clone())
    }

    fn stats_repo(&self) -> repositories::stats::StatsRepository {
        repositories::stats::StatsRepository::new(self.conn.clone())
    }

    // ========== Account Methods ==========

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<admin::Model>> {
        self.account_repo().find_admin_by_username(username).await
    }

    pub async fn find_viewer_by_username(&self, username: &str) -> Result<Option<viewer::Model>> {
        self.account_repo().find_viewer_by_username(username).await
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool> {
        self.account_repo().username_taken(username).await
    }

    pub async fn create_viewer(&self, input: NewViewer) -> Result<viewer::Model> {
        self.account_repo().create_viewer(input).await
    }

    pub async fn update_viewer_password(&self, account: i32, password_hash: String) -> Result<()> {
        self.account_repo()
            .update_viewer_password(account, password_hash)
            .await
    }

    // ========== Series Methods ==========

    pub async fn get_series(&self, sid: i32) -> Result<Option<series::Model>> {
        self.series_repo().get(sid).await
    }

    pub async fn list_series_overview(&self) -> Result<Vec<SeriesOverviewRow>> {
        self.series_repo().list_overview().await
    }

    pub async fn browse_series(&self, filter: &BrowseFilter) -> Result<Vec<BrowseSeriesRow>> {
        self.series_repo().browse(filter).await
    }

    pub async fn series_genres(&self, sid: i32) -> Result<Vec<String>> {
        self.series_repo().genres_for(sid).await
    }

    pub async fn series_subtitles(&self, sid: i32) -> Result<Vec<String>> {
        self.series_repo().subtitles_for(sid).await
    }

    pub async fn series_dubbings(&self, sid: i32) -> Result<Vec<String>> {
        self.series_repo().dubbings_for(sid).await
    }

    pub async fn series_release_countries(&self, sid: i32) -> Result<Vec<ReleaseCountryRow>> {
        self.series_repo().release_countries_for(sid).await
    }

    pub async fn create_series(
        &self,
        sname: String,
        nepisodes: i32,
        ori_lang: String,
    ) -> Result<i32> {
        self.series_repo().create(sname, nepisodes, ori_lang).await
    }

    pub async fn update_series(
        &self,
        sid: i32,
        sname: String,
        nepisodes: i32,
        ori_lang: String,
        children: SeriesChildren,
    ) -> Result<bool> {
        self.series_repo()
            .update(sid, sname, nepisodes, ori_lang, children)
            .await
    }

    pub async fn delete_series(&self, sid: i32) -> Result<bool> {
        self.series_repo().delete(sid).await
    }

    // ========== Episode Methods ==========

    pub async fn episodes_for_series(&self, sid: i32) -> Result<Vec<episode::Model>> {
        self.episode_repo().list_for_series(sid).await
    }

    pub async fn create_episode(&self, sid: i32, input: EpisodeInput) -> Result<i32> {
        self.episode_repo().create(sid, input).await
    }

    pub async fn update_episode(&self, eid: i32, input: EpisodeInput) -> Result<bool> {
        self.episode_repo().update(eid, input).await
    }

    pub async fn delete_episode(&self, eid: i32) -> Result<bool> {
        self.episode_repo().delete(eid).await
    }

    // ========== Producer & Collaboration Methods ==========

    pub async fn list_producers(&self) -> Result<Vec<ProducerRow>> {
        self.producer_repo().list().await
    }

    pub async fn create_producer(&self, input: ProducerInput) -> Result<i32> {
        self.producer_repo().create(input).await
    }

    pub async fn update_producer(&self, pid: i32, input: ProducerInput) -> Result<bool> {
        self.producer_repo().update(pid, input).await
    }

    pub async fn delete_producer(&self, pid: i32) -> Result<bool> {
        self.producer_repo().delete(pid).await
    }

    pub async fn list_collaborations(&self) -> Result<Vec<CollaborationRow>> {
        self.producer_repo().list_collaborations().await
    }

    pub async fn add_collaboration(&self, pid: i32, phouse_id: i32) -> Result<bool> {
        self.producer_repo().add_collaboration(pid, phouse_id).await
    }

    pub async fn remove_collaboration(&self, pid: i32, phouse_id: i32) -> Result<bool> {
        self.producer_repo()
            .remove_collaboration(pid, phouse_id)
            .await
    }

    // ========== Production House Methods ==========

    pub async fn list_phouses(&self) -> Result<Vec<StudioRow>> {
        self.studio_repo().list().await
    }

    pub async fn create_phouse(&self, input: StudioInput) -> Result<i32> {
        self.studio_repo().create(input).await
    }

    pub async fn update_phouse(&self, phouse_id: i32, input: StudioInput) -> Result<bool> {
        self.studio_repo().update(phouse_id, input).await
    }

    pub async fn phouse_contract_count(&self, phouse_id: i32) -> Result<u64> {
        self.studio_repo().contract_count(phouse_id).await
    }

    pub async fn delete_phouse(&self, phouse_id: i32) -> Result<bool> {
        self.studio_repo().delete(phouse_id).await
    }

    // ========== Contract Methods ==========

    pub async fn list_contracts(&self) -> Result<Vec<ContractRow>> {
        self.contract_repo().list().await
    }

    pub async fn create_contract(&self, input: ContractInput) -> Result<i32> {
        self.contract_repo().create(input).await
    }

    pub async fn update_contract(&self, contract_id: i32, input: ContractInput) -> Result<bool> {
        self.contract_repo().update(contract_id, input).await
    }

    pub async fn delete_contract(&self, contract_id: i32) -> Result<bool> {
        self.contract_repo().delete(contract_id).await
    }

    // ========== Viewer Methods ==========

    pub async fn list_viewers_admin(&self) -> Result<Vec<ViewerAdminRow>> {
        self.viewer_repo().list_admin().await
    }

    pub async fn get_viewer(&self, account: i32) -> Result<Option<viewer::Model>> {
        self.viewer_repo().get_model(account).await
    }

    pub async fn get_viewer_profile(&self, account: i32) -> Result<Option<ViewerProfileRow>> {
        self.viewer_repo().get_profile(account).await
    }

    pub async fn update_viewer_admin_fields(
        &self,
        account: i32,
        update: ViewerAdminUpdate,
    ) -> Result<bool> {
        self.viewer_repo().update_admin_fields(account, update).await
    }

    pub async fn update_viewer_profile(
        &self,
        account: i32,
        street: String,
        city: String,
        state: String,
        zipcode: String,
        cid: i32,
    ) -> Result<bool> {
        self.viewer_repo()
            .update_profile(account, street, city, state, zipcode, cid)
            .await
    }

    // ========== Feedback Methods ==========

    pub async fn feedback_for_series(&self, sid: i32) -> Result<Vec<SeriesFeedbackRow>> {
        self.feedback_repo().list_for_series(sid).await
    }

    pub async fn feedback_stats_for_series(&self, sid: i32) -> Result<(Option<f64>, i64)> {
        self.feedback_repo().stats_for_series(sid).await
    }

    pub async fn get_feedback(&self, account: i32, sid: i32) -> Result<Option<feedback::Model>> {
        self.feedback_repo().get(account, sid).await
    }

    pub async fn upsert_feedback(
        &self,
        account: i32,
        sid: i32,
        rate: i32,
        ftext: String,
        fdate: NaiveDate,
    ) -> Result<()> {
        self.feedback_repo()
            .upsert(account, sid, rate, ftext, fdate)
            .await
    }

    pub async fn delete_feedback(&self, account: i32, sid: i32) -> Result<bool> {
        self.feedback_repo().delete(account, sid).await
    }

    pub async fn list_feedback_moderation(
        &self,
        filter: &FeedbackFilter,
    ) -> Result<Vec<ModerationRow>> {
        self.feedback_repo().list_moderation(filter).await
    }

    pub async fn feedback_for_viewer(&self, account: i32) -> Result<Vec<OwnFeedbackRow>> {
        self.feedback_repo().list_for_viewer(account).await
    }

    // ========== History Methods ==========

    pub async fn append_history(
        &self,
        admin_id: i32,
        target_table: &str,
        action_type: &str,
        sql_text: &str,
    ) -> Result<()> {
        self.history_repo()
            .append(admin_id, target_table, action_type, sql_text)
            .await
    }

    pub async fn list_history(&self) -> Result<Vec<HistoryRow>> {
        self.history_repo().list().await
    }

    // ========== Report & Stats Methods ==========

    pub async fn run_report(&self, sql: &str) -> Result<Vec<JsonValue>> {
        self.report_repo().run(sql).await
    }

    pub async fn count_series(&self) -> Result<u64> {
        self.stats_repo().count_series().await
    }

    pub async fn count_viewers(&self) -> Result<u64> {
        self.stats_repo().count_viewers().await
    }

    pub async fn count_feedback(&self) -> Result<u64> {
        self.stats_repo().count_feedback().await
    }

    pub async fn count_feedback_since(&self, cutoff: NaiveDate) -> Result<u64> {
        self.stats_repo().count_feedback_since(cutoff).await
    }

    pub async fn series_rating_rows(&self) -> Result<Vec<SeriesRatingRow>> {
        self.stats_repo().series_rating_rows().await
    }

    pub async fn signup_rows(&self) -> Result<Vec<(NaiveDate, f64)>> {
        self.stats_repo().signup_rows().await
    }
}
