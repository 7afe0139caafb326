use crate::intent::{ConfirmedDelete, NotesEditing};
use crate::session_store::SessionStore;
use jobtrack_core::api::JobApi;
use jobtrack_core::classifier::{ErrorClassifier, ErrorContext};
use jobtrack_core::error::{Result, TrackerError};
use jobtrack_core::job::{JobDraft, JobId, JobPatch, JobRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Load state of the record list, backing the full-page retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The list could not be loaded; carries the display message.
    Failed(String),
}

/// How the local set is brought back in line with the server after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteConsistency {
    /// Re-fetch the full list so server-computed fields are picked up.
    RefetchAfterWrite,
    /// Apply the sent fields to the local copy. Server-side normalization
    /// (e.g. reformatted dates) is not seen until the next list.
    MergeAfterWrite,
}

/// The mutating operations of [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Create,
    Update,
    SaveNotes,
    Remove,
}

impl WriteOperation {
    pub fn consistency(&self) -> WriteConsistency {
        match self {
            WriteOperation::Create => WriteConsistency::RefetchAfterWrite,
            WriteOperation::Update | WriteOperation::SaveNotes | WriteOperation::Remove => {
                WriteConsistency::MergeAfterWrite
            }
        }
    }
}

#[derive(Debug, Default)]
struct RecordState {
    records: Vec<JobRecord>,
    list_state: ListState,
    last_error: Option<String>,
}

/// The client's copy of the authoritative record set.
///
/// Every operation requires an authenticated session. A failed write leaves
/// the local set exactly as it was and exposes the classified message via
/// [`RecordStore::last_error`]; nothing is retried automatically.
///
/// After a successful write the local set is reconciled per
/// [`WriteOperation::consistency`], unless [`RecordStore::with_consistency`]
/// forces one strategy for every write.
///
/// Overlapping calls are not cancelled: two in-flight `list()` calls resolve
/// last-writer-wins.
pub struct RecordStore {
    api: Arc<dyn JobApi>,
    session: Arc<SessionStore>,
    classifier: ErrorClassifier,
    consistency: Option<WriteConsistency>,
    state: RwLock<RecordState>,
}

impl RecordStore {
    pub fn new(api: Arc<dyn JobApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            classifier: ErrorClassifier::default(),
            consistency: None,
            state: RwLock::new(RecordState::default()),
        }
    }

    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Uses `consistency` after every write instead of the per-operation default.
    pub fn with_consistency(mut self, consistency: WriteConsistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    /// The reconciliation applied after a successful `operation`.
    pub fn consistency_for(&self, operation: WriteOperation) -> WriteConsistency {
        self.consistency.unwrap_or_else(|| operation.consistency())
    }

    /// A copy of the current set, in server order.
    pub async fn records(&self) -> Vec<JobRecord> {
        self.state.read().await.records.clone()
    }

    /// Runs `f` over the current set without copying it.
    pub async fn with_records<R>(&self, f: impl FnOnce(&[JobRecord]) -> R) -> R {
        f(&self.state.read().await.records)
    }

    pub async fn find(&self, id: &JobId) -> Option<JobRecord> {
        self.state
            .read()
            .await
            .records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    pub async fn list_state(&self) -> ListState {
        self.state.read().await.list_state.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.last_error = None;
    }

    /// Fetches the full set and replaces the local copy.
    ///
    /// An unreadable response shape yields an empty set rather than an error.
    /// On failure the previous set is kept and the list is marked `Failed`.
    pub async fn list(&self) -> Result<usize> {
        self.require_session().await?;

        {
            let mut state = self.state.write().await;
            state.list_state = ListState::Loading;
            state.last_error = None;
        }

        let payload = match self.api.list_jobs().await {
            Ok(payload) => payload,
            Err(e) => {
                let message = self.classifier.classify(&e, ErrorContext::General);
                tracing::warn!("[RecordStore] Failed to load records: {}", message);
                let mut state = self.state.write().await;
                state.list_state = ListState::Failed(message.clone());
                state.last_error = Some(message);
                return Err(e.into());
            }
        };

        let records = match payload.into_records() {
            Some(records) => dedupe(records),
            None => {
                tracing::warn!("[RecordStore] Unexpected list response shape; showing no records");
                Vec::new()
            }
        };

        let count = records.len();
        let mut state = self.state.write().await;
        state.records = records;
        state.list_state = ListState::Loaded;
        tracing::debug!("[RecordStore] Loaded {} records", count);
        Ok(count)
    }

    /// Reloads after a failed list.
    pub async fn retry(&self) -> Result<usize> {
        self.list().await
    }

    /// Submits a new record, then re-fetches the list.
    ///
    /// The form is cleared once the server accepts the record. If the
    /// follow-up fetch fails, its error is returned and the list is marked
    /// `Failed`. Under `MergeAfterWrite` the echoed record is appended
    /// instead; a response without one falls back to a re-fetch.
    pub async fn create(&self, draft: &mut JobDraft) -> Result<usize> {
        self.require_session().await?;
        if let Err(e) = draft.validate() {
            return Err(self.fail(e).await);
        }
        self.clear_error().await;

        let payload = match self.api.create_job(draft).await {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e.into()).await),
        };

        let created = payload.into_record();
        match &created {
            Some(created) => tracing::info!(
                "[RecordStore] Created record {} ({} / {})",
                created.id,
                created.company,
                created.position
            ),
            None => tracing::info!("[RecordStore] Created record for {}", draft.company),
        }
        draft.clear();

        match created {
            Some(created) => {
                self.settle(WriteOperation::Create, |records| {
                    if !records.iter().any(|record| record.id == created.id) {
                        records.push(created);
                    }
                })
                .await
            }
            None => self.list().await,
        }
    }

    /// Sends a partial update and merges it into the local copy.
    ///
    /// The record must be in the local set. An empty patch is a local no-op.
    pub async fn update(&self, id: &JobId, patch: JobPatch) -> Result<JobRecord> {
        self.write_patch(id, patch, WriteOperation::Update).await
    }

    /// Saves the notes editor. A detached editor is rejected locally.
    pub async fn save_notes(&self, editing: &NotesEditing) -> Result<JobRecord> {
        let Some(id) = editing.target() else {
            return Err(self.fail(TrackerError::no_target("No job selected")).await);
        };
        self.write_patch(id, editing.patch(), WriteOperation::SaveNotes)
            .await
    }

    /// Deletes a confirmed record and drops it from the local set.
    pub async fn remove(&self, confirmed: ConfirmedDelete) -> Result<()> {
        self.require_session().await?;
        self.clear_error().await;
        let id = confirmed.id();

        if let Err(e) = self.api.delete_job(id).await {
            return Err(self.fail(e.into()).await);
        }
        tracing::info!("[RecordStore] Removed record {}", id);

        self.settle(WriteOperation::Remove, |records| {
            records.retain(|record| &record.id != id)
        })
        .await?;
        Ok(())
    }

    async fn write_patch(
        &self,
        id: &JobId,
        patch: JobPatch,
        operation: WriteOperation,
    ) -> Result<JobRecord> {
        self.require_session().await?;

        let Some(current) = self.find(id).await else {
            return Err(self.fail(TrackerError::not_found("Job", id.as_str())).await);
        };
        self.clear_error().await;

        if patch.is_empty() {
            return Ok(current);
        }

        if let Err(e) = self.api.update_job(id, &patch).await {
            return Err(self.fail(e.into()).await);
        }
        tracing::info!("[RecordStore] {:?} applied to record {}", operation, id);

        self.settle(operation, |records| {
            if let Some(record) = records.iter_mut().find(|record| &record.id == id) {
                patch.apply_to(record);
            }
        })
        .await?;

        match self.find(id).await {
            Some(record) => Ok(record),
            None => {
                // Dropped by a list that resolved while the update was in flight.
                tracing::warn!("[RecordStore] Record {} vanished during {:?}", id, operation);
                let mut merged = current;
                patch.apply_to(&mut merged);
                Ok(merged)
            }
        }
    }

    /// Reconciles the local set after a successful write; returns its size.
    async fn settle(
        &self,
        operation: WriteOperation,
        merge: impl FnOnce(&mut Vec<JobRecord>),
    ) -> Result<usize> {
        match self.consistency_for(operation) {
            WriteConsistency::RefetchAfterWrite => self.list().await,
            WriteConsistency::MergeAfterWrite => {
                let mut state = self.state.write().await;
                merge(&mut state.records);
                Ok(state.records.len())
            }
        }
    }

    async fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated().await {
            return Ok(());
        }
        Err(self.fail(TrackerError::Unauthenticated).await)
    }

    async fn fail(&self, err: TrackerError) -> TrackerError {
        let message = self.classifier.classify_error(&err, ErrorContext::General);
        tracing::warn!("[RecordStore] {}", message);
        self.state.write().await.last_error = Some(message);
        err
    }
}

/// Keeps the first record for each id.
fn dedupe(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    let total = records.len();
    let unique: Vec<JobRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    if unique.len() != total {
        tracing::warn!(
            "[RecordStore] Dropped {} records with duplicate ids",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
#[path = "record_store_test.rs"]
mod tests;
