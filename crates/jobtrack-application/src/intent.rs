//! Short-lived UI intents.
//!
//! Each intent refers to at most one record, by id, and is dropped once the
//! action completes or is dismissed. None of them is owned by the stores.

use jobtrack_core::export::ExportFormat;
use jobtrack_core::job::{JobId, JobPatch, JobRecord, NotesUpdate};

/// A pending "are you sure?" prompt for deleting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    target: JobId,
}

impl DeleteConfirmation {
    /// Opens the prompt for `id`.
    pub fn request(id: impl Into<JobId>) -> Self {
        Self { target: id.into() }
    }

    pub fn target(&self) -> &JobId {
        &self.target
    }

    /// The user confirmed. The returned token is the only way to delete.
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { id: self.target }
    }

    /// The user backed out.
    pub fn dismiss(self) {
        tracing::debug!("[DeleteConfirmation] Dismissed delete of {}", self.target);
    }
}

/// Proof that a delete was confirmed. Only [`DeleteConfirmation::confirm`]
/// creates one.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: JobId,
}

impl ConfirmedDelete {
    pub fn id(&self) -> &JobId {
        &self.id
    }
}

/// The notes & reminder editor.
///
/// A detached editor (no target) can be filled in but never saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesEditing {
    target: Option<JobId>,
    pub draft: NotesUpdate,
}

impl NotesEditing {
    /// Opens the editor pre-filled from `record`.
    pub fn open(record: &JobRecord) -> Self {
        Self {
            target: Some(record.id.clone()),
            draft: NotesUpdate::from_record(record),
        }
    }

    pub fn target(&self) -> Option<&JobId> {
        self.target.as_ref()
    }

    pub fn patch(&self) -> JobPatch {
        self.draft.clone().into()
    }
}

/// Which records an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// The whole authoritative set.
    #[default]
    All,
    /// The current search/status/sort view.
    Filtered,
}

/// Options picked in the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub include_extended: bool,
    pub scope: ExportScope,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_extended: true,
            scope: ExportScope::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_yields_token_for_target() {
        let prompt = DeleteConfirmation::request(7);
        assert_eq!(prompt.target().as_str(), "7");
        let token = prompt.confirm();
        assert_eq!(token.id().as_str(), "7");
    }

    #[test]
    fn test_notes_editor_prefills_from_record() {
        let mut record = JobRecord::new(3, "Acme", "Engineer");
        record.notes = Some("Call Tuesday".into());
        record.reminder_date = Some("2024-03-15".into());

        let editor = NotesEditing::open(&record);
        assert_eq!(editor.target().map(JobId::as_str), Some("3"));
        assert_eq!(editor.draft.notes, "Call Tuesday");
        assert_eq!(editor.draft.reminder_text, "");

        let patch = editor.patch();
        assert_eq!(patch.notes.as_deref(), Some("Call Tuesday"));
        assert_eq!(patch.reminder_text.as_deref(), Some(""));
        assert_eq!(patch.company, None);
    }

    #[test]
    fn test_detached_editor_has_no_target() {
        assert_eq!(NotesEditing::default().target(), None);
    }

    #[test]
    fn test_export_defaults() {
        let request = ExportRequest::default();
        assert_eq!(request.format, ExportFormat::Csv);
        assert!(request.include_extended);
        assert_eq!(request.scope, ExportScope::All);
    }
}
