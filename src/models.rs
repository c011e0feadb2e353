// Core models for the job console client

use crate::types::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name given to pasted text when it is wrapped as a synthetic upload.
pub const RAW_INPUT_NAME: &str = "raw-input.txt";

/// A unit of submitted annotation work, as tracked by the console.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: String,
    pub orig_input_fname: String,
    pub submission_time: DateTime<Utc>,
    pub viewable: bool,
}

/// Job record as the server sends it. `submission_time` arrives as a string
/// and is parsed when converting into [`Job`].
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub orig_input_fname: String,
    pub submission_time: String,
    pub viewable: bool,
}

impl TryFrom<JobRecord> for Job {
    type Error = AppError;

    fn try_from(record: JobRecord) -> AppResult<Self> {
        let submission_time = parse_submission_time(&record.submission_time)?;
        Ok(Job {
            id: record.id,
            orig_input_fname: record.orig_input_fname,
            submission_time,
            viewable: record.viewable,
        })
    }
}

/// Parse a server-provided submission time string.
///
/// Accepts RFC 3339 as well as the bare datetime renderings some servers
/// emit; bare values are taken as UTC.
pub fn parse_submission_time(raw: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(AppError::InvalidResponse(format!(
        "unparseable submission time: {raw:?}"
    )))
}

/// A server-defined annotator plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnnotatorInfo {
    pub name: String,
    pub title: String,
}

/// Options attached to a submission as the JSON `options` multipart field.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOptions {
    pub annotators: Vec<String>,
    pub assembly: String,
}

/// The single input source used by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Pasted text, uploaded under the name [`RAW_INPUT_NAME`].
    Text(String),
    /// A user-selected file.
    File { bytes: Vec<u8>, name: String },
}

impl InputSource {
    /// Decide which input source a submission uses. Non-empty text wins over
    /// a selected file; with neither there is nothing to submit.
    pub fn resolve(text: &str, file: Option<(Vec<u8>, String)>) -> Option<Self> {
        if !text.is_empty() {
            return Some(InputSource::Text(text.to_string()));
        }
        file.map(|(bytes, name)| InputSource::File { bytes, name })
    }

    pub fn file_name(&self) -> &str {
        match self {
            InputSource::Text(_) => RAW_INPUT_NAME,
            InputSource::File { name, .. } => name,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            InputSource::Text(text) => text.into_bytes(),
            InputSource::File { bytes, .. } => bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_submission_times() {
        let parsed = parse_submission_time("2024-05-01T10:30:00+00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());

        let offset = parse_submission_time("2024-05-01T12:30:00+02:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn parses_bare_datetimes_as_utc() {
        let parsed = parse_submission_time("2024-05-01 10:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());

        let fractional = parse_submission_time("2024-05-01T10:30:00.250").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn rejects_garbage_submission_times() {
        assert!(parse_submission_time("next tuesday").is_err());
        assert!(parse_submission_time("").is_err());
    }

    #[test]
    fn job_record_conversion_parses_time() {
        let record = JobRecord {
            id: "job-1".to_string(),
            orig_input_fname: "variants.vcf".to_string(),
            submission_time: "2024-05-01T10:30:00Z".to_string(),
            viewable: true,
        };
        let job = Job::try_from(record).unwrap();
        assert_eq!(job.id, "job-1");
        assert!(job.viewable);
        assert_eq!(
            job.submission_time,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn text_input_wins_over_selected_file() {
        let file = Some((b"file contents".to_vec(), "variants.vcf".to_string()));
        let source = InputSource::resolve("chr1 12345 A T", file).unwrap();
        assert_eq!(source, InputSource::Text("chr1 12345 A T".to_string()));
        assert_eq!(source.file_name(), RAW_INPUT_NAME);
        assert_eq!(source.into_bytes(), b"chr1 12345 A T".to_vec());
    }

    #[test]
    fn empty_text_falls_back_to_selected_file() {
        let file = Some((b"file contents".to_vec(), "variants.vcf".to_string()));
        let source = InputSource::resolve("", file).unwrap();
        assert_eq!(source.file_name(), "variants.vcf");
        assert_eq!(source.into_bytes(), b"file contents".to_vec());
    }

    #[test]
    fn no_input_resolves_to_none() {
        assert!(InputSource::resolve("", None).is_none());
    }
}
