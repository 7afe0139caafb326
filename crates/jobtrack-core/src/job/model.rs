//! Job application domain model.
//!
//! Field names follow the remote service's JSON (`resume_used`,
//! `date_applied`, ...). Dates are kept as the raw wire string so a record
//! round-trips unchanged; use the `*_on()` accessors for calendar dates.

use super::date::parse_wire_date;
use super::status::JobStatus;
use crate::error::{Result, TrackerError};
use crate::serde_helpers::{non_blank, text_or_empty};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned record identifier.
///
/// Opaque to the client. The server may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i32> for JobId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Signed(id) => JobId(id.to_string()),
            RawId::Unsigned(id) => JobId(id.to_string()),
            RawId::Text(id) => JobId(id),
        })
    }
}

/// A job application as held in the authoritative set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub resume_used: Option<String>,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<String>,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(default, deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub reminder_text: Option<String>,
}

impl JobRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<JobId>, company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            company: company.into(),
            position: position.into(),
            resume_used: None,
            date_applied: None,
            status: None,
            notes: None,
            reminder_date: None,
            reminder_text: None,
        }
    }

    /// The applied date, if present and parseable.
    pub fn applied_on(&self) -> Option<NaiveDate> {
        self.date_applied.as_deref().and_then(parse_wire_date)
    }

    /// Status label, "Unknown" when absent or unrecognised.
    pub fn status_label(&self) -> &'static str {
        self.status.as_ref().map_or("Unknown", JobStatus::label)
    }

    /// True when both a reminder date and text are set.
    pub fn has_reminder(&self) -> bool {
        self.reminder_date.is_some() && self.reminder_text.is_some()
    }
}

// ============================================================================
// Write forms
// ============================================================================

/// The "add job" form. Sent to the server without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobDraft {
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "str_is_blank")]
    pub resume_used: String,
    #[serde(skip_serializing_if = "str_is_blank")]
    pub date_applied: String,
    #[serde(skip_serializing_if = "str_is_blank")]
    pub status: String,
}

fn str_is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl JobDraft {
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    /// Company and position are required.
    pub fn validate(&self) -> Result<()> {
        if self.company.trim().is_empty() {
            return Err(TrackerError::validation("Company is required"));
        }
        if self.position.trim().is_empty() {
            return Err(TrackerError::validation("Position is required"));
        }
        Ok(())
    }

    /// Resets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A partial update. Only `Some` fields are sent and merged.
///
/// A `Some("")` text value clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_text: Option<String>,
}

impl JobPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the set fields into `record`.
    pub fn apply_to(&self, record: &mut JobRecord) {
        if let Some(company) = &self.company {
            record.company = company.clone();
        }
        if let Some(position) = &self.position {
            record.position = position.clone();
        }
        merge_optional(&mut record.resume_used, &self.resume_used);
        merge_optional(&mut record.date_applied, &self.date_applied);
        if let Some(status) = &self.status {
            record.status = (!str_is_blank(status.as_str())).then(|| status.clone());
        }
        merge_optional(&mut record.notes, &self.notes);
        merge_optional(&mut record.reminder_date, &self.reminder_date);
        merge_optional(&mut record.reminder_text, &self.reminder_text);
    }
}

fn merge_optional(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = (!str_is_blank(value)).then(|| value.clone());
    }
}

/// The notes & reminder fields edited together in the notes modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotesUpdate {
    pub notes: String,
    pub reminder_date: String,
    pub reminder_text: String,
}

impl NotesUpdate {
    /// Pre-fills the form from a record.
    pub fn from_record(record: &JobRecord) -> Self {
        Self {
            notes: record.notes.clone().unwrap_or_default(),
            reminder_date: record.reminder_date.clone().unwrap_or_default(),
            reminder_text: record.reminder_text.clone().unwrap_or_default(),
        }
    }
}

impl From<NotesUpdate> for JobPatch {
    fn from(update: NotesUpdate) -> Self {
        JobPatch {
            notes: Some(update.notes),
            reminder_date: Some(update.reminder_date),
            reminder_text: Some(update.reminder_text),
            ..JobPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_wire_with_numeric_id_and_blanks() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": 7,
            "company": "Acme",
            "position": "Eng",
            "resume_used": "",
            "date_applied": "2024-03-01",
            "status": "interview",
            "notes": null
        }))
        .unwrap();

        assert_eq!(record.id, JobId::new("7"));
        assert_eq!(record.resume_used, None);
        assert_eq!(record.status, Some(JobStatus::Interview));
        assert_eq!(record.applied_on(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_record_with_null_and_numeric_fields_still_renders() {
        let record: JobRecord = serde_json::from_value(json!({
            "id": 2,
            "company": null,
            "position": 42,
            "status": 2
        }))
        .unwrap();

        assert_eq!(record.company, "");
        assert_eq!(record.position, "42");
        assert_eq!(record.status, Some(JobStatus::Other("2".into())));
        assert_eq!(record.status_label(), "Unknown");
    }

    #[test]
    fn test_unknown_status_renders() {
        let mut record = JobRecord::new(1, "Acme", "Eng");
        assert_eq!(record.status_label(), "Unknown");
        record.status = Some(JobStatus::from("ghosted"));
        assert_eq!(record.status_label(), "Unknown");
        record.status = Some(JobStatus::Offer);
        assert_eq!(record.status_label(), "Offer");
    }

    #[test]
    fn test_draft_body_skips_blank_optionals() {
        let mut draft = JobDraft::new("Acme", "Eng");
        draft.status = "applied".into();
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"company": "Acme", "position": "Eng", "status": "applied"})
        );
    }

    #[test]
    fn test_draft_validation_and_clear() {
        assert!(JobDraft::new("", "Eng").validate().is_err());
        assert!(JobDraft::new("Acme", " ").validate().is_err());

        let mut draft = JobDraft::new("Acme", "Eng");
        assert!(draft.validate().is_ok());
        draft.clear();
        assert_eq!(draft, JobDraft::default());
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut record = JobRecord::new(1, "Acme", "Eng");
        record.notes = Some("old".into());
        record.resume_used = Some("cv-v1".into());

        let patch = JobPatch {
            position: Some("Senior Eng".into()),
            notes: Some(String::new()),
            status: Some(JobStatus::Offer),
            ..JobPatch::default()
        };
        patch.apply_to(&mut record);

        assert_eq!(record.company, "Acme");
        assert_eq!(record.position, "Senior Eng");
        assert_eq!(record.notes, None);
        assert_eq!(record.resume_used.as_deref(), Some("cv-v1"));
        assert_eq!(record.status, Some(JobStatus::Offer));
    }

    #[test]
    fn test_notes_update_round_trip_through_patch() {
        let mut record = JobRecord::new(1, "Acme", "Eng");
        record.notes = Some("Call back".into());

        let mut update = NotesUpdate::from_record(&record);
        assert_eq!(update.notes, "Call back");
        update.reminder_date = "2024-04-01".into();
        update.reminder_text = "Follow up".into();

        JobPatch::from(update).apply_to(&mut record);
        assert!(record.has_reminder());
        assert_eq!(record.notes.as_deref(), Some("Call back"));
    }
}
