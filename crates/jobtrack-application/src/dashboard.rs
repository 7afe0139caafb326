//! Dashboard - the authenticated page.
//!
//! Holds the user's view choices and recomputes everything derived from the
//! record set on demand. Nothing derived is cached between calls.

use crate::intent::{ExportRequest, ExportScope};
use crate::record_store::RecordStore;
use crate::session_store::SessionStore;
use chrono::NaiveDate;
use jobtrack_core::error::Result;
use jobtrack_core::export::{ExportDocument, serialize_records};
use jobtrack_core::job::JobRecord;
use jobtrack_core::timeline::{MonthSelection, Timeline, project_timeline};
use jobtrack_core::view::{Analytics, ViewState, compute_analytics, derive_view};
use std::sync::Arc;

pub struct Dashboard {
    session: Arc<SessionStore>,
    records: Arc<RecordStore>,
    pub view: ViewState,
    pub month: MonthSelection,
}

impl Dashboard {
    pub fn new(session: Arc<SessionStore>, records: Arc<RecordStore>) -> Self {
        Self {
            session,
            records,
            view: ViewState::default(),
            month: MonthSelection::All,
        }
    }

    pub fn records(&self) -> &Arc<RecordStore> {
        &self.records
    }

    /// Name shown in the header: username, else email, else "User".
    pub async fn greeting(&self) -> String {
        self.session.snapshot().await.display_name().to_string()
    }

    /// Captures the current record set together with the view choices.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            records: self.records.records().await,
            view: self.view.clone(),
            month: self.month,
        }
    }

    pub async fn export(&self, request: ExportRequest, today: NaiveDate) -> Result<ExportDocument> {
        self.snapshot().await.export(request, today)
    }
}

/// A point-in-time copy of the dashboard inputs.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub records: Vec<JobRecord>,
    pub view: ViewState,
    pub month: MonthSelection,
}

impl DashboardSnapshot {
    /// The searched, filtered and sorted list.
    pub fn visible(&self) -> Vec<&JobRecord> {
        derive_view(&self.records, &self.view)
    }

    /// Statistics over the full set, ignoring search and status filter.
    pub fn analytics(&self, today: NaiveDate) -> Analytics {
        compute_analytics(&self.records, today)
    }

    /// Month groups over the visible list.
    pub fn timeline(&self) -> Timeline<'_> {
        project_timeline(self.visible())
    }

    /// Records of the selected month, or every dated record for "all".
    pub fn selected_month(&self) -> Vec<&JobRecord> {
        self.timeline().select(self.month)
    }

    pub fn export(&self, request: ExportRequest, today: NaiveDate) -> Result<ExportDocument> {
        let records = match request.scope {
            ExportScope::All => self.records.iter().collect(),
            ExportScope::Filtered => self.visible(),
        };
        tracing::info!(
            "[Dashboard] Exporting {} records ({:?}, {})",
            records.len(),
            request.scope,
            request.format
        );
        serialize_records(records, request.format, request.include_extended, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAuthApi, MockJobApi, RecordingNavigator};
    use jobtrack_core::api::AuthApi;
    use jobtrack_core::export::ExportFormat;
    use jobtrack_core::job::JobStatus;
    use jobtrack_core::timeline::MonthKey;
    use jobtrack_core::view::{SortKey, SortOrder};

    fn job(id: i64, company: &str, date: Option<&str>, status: JobStatus) -> JobRecord {
        let mut record = JobRecord::new(id, company, "Engineer");
        record.date_applied = date.map(str::to_string);
        record.status = Some(status);
        record
    }

    async fn dashboard(auth: MockAuthApi) -> Dashboard {
        let auth: Arc<dyn AuthApi> = Arc::new(auth);
        let session = Arc::new(SessionStore::new(auth, Arc::new(RecordingNavigator::default())));
        session.probe_session().await;

        let jobs = MockJobApi::with_records(vec![
            job(1, "Acme", Some("2024-03-01"), JobStatus::Applied),
            job(2, "Globex", Some("2024-02-14"), JobStatus::Interview),
            job(3, "Initech", None, JobStatus::Applied),
            job(4, "Hooli", Some("2023-11-30"), JobStatus::Rejected),
        ]);
        let records = Arc::new(RecordStore::new(Arc::new(jobs), session.clone()));
        records.list().await.unwrap();
        Dashboard::new(session, records)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn test_greeting_uses_username() {
        let board = dashboard(MockAuthApi::logged_in("al")).await;
        assert_eq!(board.greeting().await, "al");
    }

    #[tokio::test]
    async fn test_view_and_analytics_are_independent() {
        let mut board = dashboard(MockAuthApi::logged_in("al")).await;
        board.view = ViewState::default().with_status(Some(JobStatus::Applied));

        let snapshot = board.snapshot().await;
        assert_eq!(snapshot.visible().len(), 2);

        let stats = snapshot.analytics(today());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(&JobStatus::Interview), 1);
        assert_eq!(stats.recent, 2);
    }

    #[tokio::test]
    async fn test_timeline_follows_view_and_skips_undated() {
        let mut board = dashboard(MockAuthApi::logged_in("al")).await;
        let snapshot = board.snapshot().await;
        let timeline = snapshot.timeline();
        assert_eq!(timeline.groups.len(), 3);
        assert_eq!(snapshot.visible().len(), 4);
        assert_eq!(snapshot.selected_month().len(), 3);

        board.month = MonthSelection::Month(MonthKey { year: 2024, month: 2 });
        let february = board.snapshot().await;
        let companies: Vec<&str> = february
            .selected_month()
            .iter()
            .map(|r| r.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Globex"]);
    }

    #[tokio::test]
    async fn test_export_scopes() {
        let mut board = dashboard(MockAuthApi::logged_in("al")).await;
        board.view = ViewState::default()
            .with_search("acme")
            .sorted_by(SortKey::Company, SortOrder::Ascending);

        let all = board.export(ExportRequest::default(), today()).await.unwrap();
        let text = String::from_utf8(all.bytes).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert_eq!(all.filename, "job_applications_2024-03-10.csv");

        let request = ExportRequest {
            format: ExportFormat::Json,
            include_extended: false,
            scope: ExportScope::Filtered,
        };
        let filtered = board.export(request, today()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&filtered.bytes).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["company"], "Acme");
    }
}
