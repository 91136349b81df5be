pub mod report_service;
pub use report_service::{CannedReport, ReportError, ReportOutput, ReportService};

pub mod report_service_impl;
pub use report_service_impl::SeaOrmReportService;

pub mod dashboard_service;
pub use dashboard_service::{
    DashboardError, DashboardService, DashboardStats, GrowthPoint, RevenuePoint, TopSeriesEntry,
};

pub mod dashboard_service_impl;
pub use dashboard_service_impl::{rank_top_series, SeaOrmDashboardService};

pub mod auth_service;
pub use auth_service::{
    AuthError, AuthService, AuthenticatedUser, ChangePasswordInput, RegisterInput, Role,
};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod history_service;
pub use history_service::{HistoryEntry, HistoryError, HistoryService};

pub mod history_service_impl;
pub use history_service_impl::SeaOrmHistoryService;
