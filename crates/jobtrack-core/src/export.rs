//! Export of job records to downloadable CSV or JSON documents.
//!
//! The serializer trusts its caller: it writes exactly the records it is
//! given, whether that is the full set or a filtered view.

use crate::error::Result;
use crate::job::{JobRecord, JobStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const BASE_HEADERS: [&str; 5] = ["Company", "Position", "Date Applied", "Status", "Resume Used"];
const EXTENDED_HEADERS: [&str; 3] = ["Notes", "Reminder Date", "Reminder Text"];

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Suggested file name, `job_applications_<YYYY-MM-DD>.<ext>`.
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One exported record. Also the shape read back when re-importing JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedJob {
    pub company: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_text: Option<String>,
}

impl ExportedJob {
    /// Projects the exported fields of `record`.
    pub fn from_record(record: &JobRecord, include_extended: bool) -> Self {
        let extended = |field: &Option<String>| field.clone().filter(|_| include_extended);
        Self {
            company: record.company.clone(),
            position: record.position.clone(),
            date_applied: record.date_applied.clone(),
            status: record.status.clone(),
            resume_used: record.resume_used.clone(),
            notes: extended(&record.notes),
            reminder_date: extended(&record.reminder_date),
            reminder_text: extended(&record.reminder_text),
        }
    }

    fn csv_row(&self, include_extended: bool) -> Vec<&str> {
        fn text(field: &Option<String>) -> &str {
            field.as_deref().unwrap_or("")
        }

        let mut row = vec![
            self.company.as_str(),
            self.position.as_str(),
            text(&self.date_applied),
            self.status.as_ref().map_or("", JobStatus::as_str),
            text(&self.resume_used),
        ];
        if include_extended {
            row.extend([
                text(&self.notes),
                text(&self.reminder_date),
                text(&self.reminder_text),
            ]);
        }
        row
    }
}

/// Suggested file name for an export made on `today`.
pub fn export_filename(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "job_applications_{}.{}",
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Renders `records` as an export document.
///
/// Base fields are company, position, applied date, status and resume. With
/// `include_extended` the notes and reminder fields are added.
pub fn serialize_records<'a, I>(
    records: I,
    format: ExportFormat,
    include_extended: bool,
    today: NaiveDate,
) -> Result<ExportDocument>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let rows: Vec<ExportedJob> = records
        .into_iter()
        .map(|record| ExportedJob::from_record(record, include_extended))
        .collect();

    let bytes = match format {
        ExportFormat::Csv => to_csv(&rows, include_extended)?,
        ExportFormat::Json => serde_json::to_vec_pretty(&rows)?,
    };

    tracing::debug!(
        "[Export] Rendered {} records as {} ({} bytes)",
        rows.len(),
        format,
        bytes.len()
    );

    Ok(ExportDocument {
        filename: export_filename(format, today),
        content_type: format.content_type(),
        bytes,
    })
}

/// Every cell quoted, embedded quotes doubled, `\n` line endings.
fn to_csv(rows: &[ExportedJob], include_extended: bool) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut headers: Vec<&str> = BASE_HEADERS.to_vec();
    if include_extended {
        headers.extend(EXTENDED_HEADERS);
    }
    writer.write_record(&headers)?;

    for row in rows {
        writer.write_record(row.csv_row(include_extended))?;
    }

    writer
        .into_inner()
        .map_err(|err| crate::error::TrackerError::io(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn records() -> Vec<JobRecord> {
        let mut first = JobRecord::new(1, "Acme", "Engineer");
        first.date_applied = Some("2024-03-01".into());
        first.status = Some(JobStatus::Interview);
        first.resume_used = Some("cv-v2".into());
        first.notes = Some(r#"Recruiter said "soon", call back"#.into());
        first.reminder_date = Some("2024-03-15".into());
        first.reminder_text = Some("Ping recruiter".into());

        let second = JobRecord::new(2, "Globex", "Designer");
        vec![first, second]
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            export_filename(ExportFormat::Csv, today()),
            "job_applications_2024-03-10.csv"
        );
        assert_eq!(
            export_filename(ExportFormat::Json, today()),
            "job_applications_2024-03-10.json"
        );
    }

    #[test]
    fn test_csv_layout() {
        let doc = serialize_records(&records(), ExportFormat::Csv, false, today()).unwrap();
        let text = String::from_utf8(doc.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(doc.content_type, "text/csv;charset=utf-8");
        assert_eq!(
            lines[0],
            r#""Company","Position","Date Applied","Status","Resume Used""#
        );
        assert_eq!(
            lines[1],
            r#""Acme","Engineer","2024-03-01","interview","cv-v2""#
        );
        assert_eq!(lines[2], r#""Globex","Designer","","","""#);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_escapes_quotes_and_keeps_cells_whole() {
        let doc = serialize_records(&records(), ExportFormat::Csv, true, today()).unwrap();
        let text = String::from_utf8(doc.bytes.clone()).unwrap();
        assert!(text.contains(r#""Recruiter said ""soon"", call back""#));

        let mut reader = csv::ReaderBuilder::new().from_reader(doc.bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 8);
        assert_eq!(&headers[5], "Notes");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 8);
        assert_eq!(&rows[0][5], r#"Recruiter said "soon", call back"#);
        assert_eq!(&rows[1][5], "");
    }

    #[test]
    fn test_json_round_trip_with_extended_fields() {
        let source = records();
        let doc = serialize_records(&source, ExportFormat::Json, true, today()).unwrap();
        assert_eq!(doc.content_type, "application/json");

        let text = String::from_utf8(doc.bytes.clone()).unwrap();
        assert!(text.starts_with("[\n  {"));

        let parsed: Vec<ExportedJob> = serde_json::from_slice(&doc.bytes).unwrap();
        assert_eq!(parsed.len(), source.len());
        for (job, record) in parsed.iter().zip(&source) {
            assert_eq!(job.company, record.company);
            assert_eq!(job.position, record.position);
            assert_eq!(job.date_applied, record.date_applied);
            assert_eq!(job.status, record.status);
            assert_eq!(job.resume_used, record.resume_used);
            assert_eq!(job.notes, record.notes);
            assert_eq!(job.reminder_date, record.reminder_date);
            assert_eq!(job.reminder_text, record.reminder_text);
        }
    }

    #[test]
    fn test_json_without_extended_fields_omits_them() {
        let doc = serialize_records(&records(), ExportFormat::Json, false, today()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&doc.bytes).unwrap();
        let first = &value[0];
        assert_eq!(first["company"], "Acme");
        assert!(first.get("notes").is_none());
        assert!(first.get("reminder_text").is_none());

        let parsed: Vec<ExportedJob> = serde_json::from_value(value).unwrap();
        let expected: Vec<ExportedJob> = records()
            .iter()
            .map(|record| ExportedJob::from_record(record, false))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let doc = serialize_records(&Vec::<JobRecord>::new(), ExportFormat::Csv, true, today()).unwrap();
        let text = String::from_utf8(doc.bytes).unwrap();
        assert_eq!(text.lines().count(), 1);

        let doc = serialize_records(&Vec::<JobRecord>::new(), ExportFormat::Json, true, today()).unwrap();
        assert_eq!(doc.bytes, b"[]");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
