//! Application status values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a job application.
///
/// The six known values are matched case-insensitively; anything else is kept
/// verbatim in `Other` so it still round-trips and renders as "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
    Pending,
    Other(String),
}

impl JobStatus {
    /// The recognised statuses, in presentation order.
    pub const KNOWN: [JobStatus; 6] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
        JobStatus::Withdrawn,
        JobStatus::Pending,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Applied => "applied",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
            JobStatus::Withdrawn => "withdrawn",
            JobStatus::Pending => "pending",
            JobStatus::Other(raw) => raw,
        }
    }

    /// Display label; unrecognised values render as "Unknown".
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
            JobStatus::Withdrawn => "Withdrawn",
            JobStatus::Pending => "Pending",
            JobStatus::Other(_) => "Unknown",
        }
    }

    /// Badge colour.
    pub fn color(&self) -> &'static str {
        match self {
            JobStatus::Applied => "#3498db",
            JobStatus::Interview => "#f39c12",
            JobStatus::Offer => "#27ae60",
            JobStatus::Rejected => "#e74c3c",
            JobStatus::Withdrawn | JobStatus::Other(_) => "#95a5a6",
            JobStatus::Pending => "#9b59b6",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, JobStatus::Other(_))
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "applied" => JobStatus::Applied,
            "interview" => JobStatus::Interview,
            "offer" => JobStatus::Offer,
            "rejected" => JobStatus::Rejected,
            "withdrawn" => JobStatus::Withdrawn,
            "pending" => JobStatus::Pending,
            _ => JobStatus::Other(raw.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        JobStatus::from(raw.as_str())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(JobStatus::from("Interview"), JobStatus::Interview);
        assert_eq!(JobStatus::from(" OFFER "), JobStatus::Offer);
    }

    #[test]
    fn test_unrecognised_status_keeps_raw_value() {
        let status = JobStatus::from("ghosted");
        assert_eq!(status, JobStatus::Other("ghosted".into()));
        assert_eq!(status.label(), "Unknown");
        assert_eq!(status.as_str(), "ghosted");
        assert!(!status.is_known());
    }

    #[test]
    fn test_badge_colours() {
        let colours: Vec<&str> = JobStatus::KNOWN.iter().map(JobStatus::color).collect();
        assert_eq!(
            colours,
            vec!["#3498db", "#f39c12", "#27ae60", "#e74c3c", "#95a5a6", "#9b59b6"]
        );
        assert_eq!(JobStatus::from("ghosted").color(), "#95a5a6");
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&JobStatus::Pending).unwrap(), r#""pending""#);
        let status: JobStatus = serde_json::from_str(r#""ghosted""#).unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""ghosted""#);
    }
}
