//! Snapshot-based report entry points.
//!
//! Each call loads a fresh snapshot; nothing is cached between calls.

use crate::config::InsightConfig;
use crate::insight::guidance::{summarize_with, Guidance};
use crate::report::aggregate::{window_report, WindowReport};
use crate::report::dashboard::{dashboard_summary, DashboardSummary};
use crate::report::session::{session_report, SessionReport};
use crate::report::window::ReportWindow;
use crate::store::DatabaseStore;
use chrono::NaiveDate;

pub struct ReportService<'s, S: DatabaseStore> {
    store: &'s S,
    insight: InsightConfig,
}

impl<'s, S: DatabaseStore> ReportService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self::with_insight_config(store, InsightConfig::default())
    }

    pub fn with_insight_config(store: &'s S, insight: InsightConfig) -> Self {
        Self { store, insight }
    }

    pub fn session(&self, date: NaiveDate) -> SessionReport {
        session_report(&self.store.load(), date)
    }

    pub fn window(&self, window: ReportWindow, today: NaiveDate) -> WindowReport {
        window_report(&self.store.load(), window, today)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        dashboard_summary(&self.store.load())
    }

    pub fn guidance(&self) -> Guidance {
        summarize_with(&self.store.load(), &self.insight)
    }
}
