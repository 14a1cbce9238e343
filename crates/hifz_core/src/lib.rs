//! Core of the memorization tracker.
//! This crate owns the persisted database, its invariants and the report
//! aggregates; views call in through services.

pub mod config;
pub mod db;
pub mod insight;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, InsightConfig, LoggingConfig, StorageConfig};
pub use insight::guidance::{summarize, summarize_with, Guidance};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status, LogLevel};
pub use model::database::Database;
pub use model::evaluation::{Evaluation, EvaluationEdit, RevisionStatus};
pub use model::locale::Locale;
pub use model::student::{Student, StudentPatch};
pub use model::{EvaluationId, StudentId, ValidationError};
pub use report::aggregate::{
    aggregate, window_report, ChartPoint, StudentAggregate, StudentReportRow, WindowReport,
};
pub use report::dashboard::{dashboard_summary, DashboardSummary, RecentActivity};
pub use report::session::{session_report, SessionReport, SessionRow};
pub use report::window::{parse_month_key, ReportPeriod, ReportWindow};
pub use repo::evaluation_repo::{EvaluationRepository, UpsertMode};
pub use repo::student_repo::StudentRepository;
pub use repo::{RepoError, RepoResult};
pub use service::evaluation_service::{EvaluationService, RepeatOutcome};
pub use service::report_service::ReportService;
pub use service::student_service::{DeletePlan, NewStudent, StudentService};
pub use service::transfer_service::{export_file_name, ImportError, ImportSummary, TransferService};
pub use store::{DatabaseStore, MemoryStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
