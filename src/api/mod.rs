use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod browse;
mod contracts;
mod dashboard;
mod episodes;
mod error;
mod feedback;
mod history;
mod observability;
mod producers;
mod profile;
mod reports;
mod series;
mod studios;
mod viewers;

pub use error::ApiError;

use tokio::sync::RwLock;

use crate::services::{AuthService, DashboardService, HistoryService, ReportService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn report_service(&self) -> &Arc<dyn ReportService> {
        &self.shared.report_service
    }

    #[must_use]
    pub fn dashboard_service(&self) -> &Arc<dyn DashboardService> {
        &self.shared.dashboard_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn history_service(&self) -> &Arc<dyn HistoryService> {
        &self.shared.history_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, inactivity_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_inactivity_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            inactivity_minutes,
        )));

    let api_router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
        .nest("/admin", admin_router())
        .nest("/viewer", viewer_router())
        .layer(session_layer)
        .with_state(state.clone());

    let metrics_router = Router::new()
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .merge(metrics_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_metrics))
}

fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(dashboard::get_stats))
        .route("/viewer-growth", get(dashboard::viewer_growth))
        .route("/revenue-growth", get(dashboard::revenue_growth))
        .route("/reports/{key}", get(reports::run_report))
        .route("/history", get(history::list_history))
        .route("/series", get(series::list_series))
        .route("/series", post(series::create_series))
        .route("/series/{sid}", get(series::get_series))
        .route("/series/{sid}", put(series::update_series))
        .route("/series/{sid}", delete(series::delete_series))
        .route("/series/{sid}/episodes", get(episodes::list_episodes))
        .route("/series/{sid}/episodes", post(episodes::add_episode))
        .route("/episodes/{eid}", put(episodes::update_episode))
        .route("/episodes/{eid}", delete(episodes::delete_episode))
        .route("/phouses", get(studios::list_phouses))
        .route("/phouses", post(studios::create_phouse))
        .route("/phouses/{phouse_id}", put(studios::update_phouse))
        .route("/phouses/{phouse_id}", delete(studios::delete_phouse))
        .route("/producers", get(producers::list_producers))
        .route("/producers", post(producers::create_producer))
        .route("/producers/{pid}", put(producers::update_producer))
        .route("/producers/{pid}", delete(producers::delete_producer))
        .route("/collaborations", get(producers::list_collaborations))
        .route("/collaborations", post(producers::add_collaboration))
        .route("/collaborations", delete(producers::remove_collaboration))
        .route("/contracts", get(contracts::list_contracts))
        .route("/contracts", post(contracts::create_contract))
        .route("/contracts/{contract_id}", put(contracts::update_contract))
        .route(
            "/contracts/{contract_id}",
            delete(contracts::delete_contract),
        )
        .route("/viewers", get(viewers::list_viewers))
        .route("/viewers/{account}", get(viewers::get_viewer))
        .route("/viewers/{account}", put(viewers::update_viewer))
        .route("/feedback", get(feedback::list_all_feedback))
        .route("/feedback", delete(feedback::remove_feedback))
        .route_layer(middleware::from_fn(auth::require_admin))
}

fn viewer_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/series", get(browse::list_series))
        .route("/series/{sid}", get(browse::get_series))
        .route("/recommendations", get(browse::recommendations))
        .route("/series/{sid}/feedback", get(feedback::series_feedback))
        .route("/series/{sid}/feedback", post(feedback::submit_feedback))
        .route(
            "/series/{sid}/feedback",
            delete(feedback::delete_own_feedback),
        )
        .route("/my-feedback", get(feedback::my_feedback))
        .route("/profile", get(profile::get_profile))
        .route("/profile", put(profile::update_profile))
        .route("/change-password", post(profile::change_password))
        .route("/security-question", get(profile::security_question))
        .route_layer(middleware::from_fn(auth::require_viewer))
}
