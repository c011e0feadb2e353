// REST client for the annotation job server.
//
// Endpoints:
//   POST /rest/submit     multipart {file, options} -> job record
//   POST /rest/view       {"jobId": ...}            -> unconstrained JSON
//   GET  /rest/jobs       -> array of job records
//   GET  /rest/annotators -> map of name -> annotator info

use crate::models::{AnnotatorInfo, InputSource, Job, JobRecord, SubmissionOptions};
use crate::types::{AppError, AppResult};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
struct ViewRequest<'a> {
    #[serde(rename = "jobId")]
    job_id: &'a str,
}

/// Client for the job server's REST surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Submit an annotation job. The input lands in the `file` field and the
    /// options are JSON-encoded into the `options` field.
    pub async fn submit_job(
        &self,
        input: InputSource,
        options: &SubmissionOptions,
    ) -> AppResult<Job> {
        let file_name = input.file_name().to_string();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        let part = Part::bytes(input.into_bytes())
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|e| AppError::Api(format!("invalid mime type: {e}")))?;
        let options_json = serde_json::to_string(options)
            .map_err(|e| AppError::Api(format!("failed to encode options: {e}")))?;
        let form = Form::new().part("file", part).text("options", options_json);

        let response = self
            .http
            .post(self.url("/rest/submit"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Api(format!("submit request failed: {e}")))?;
        let record: JobRecord = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("bad submit response: {e}")))?;
        Job::try_from(record)
    }

    /// Request the view payload for a job. The response shape is
    /// unconstrained; the caller decides what to do with it.
    pub async fn view_job(&self, job_id: &str) -> AppResult<serde_json::Value> {
        let response = self
            .http
            .post(self.url("/rest/view"))
            .json(&ViewRequest { job_id })
            .send()
            .await
            .map_err(|e| AppError::Api(format!("view request failed: {e}")))?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("bad view response: {e}")))
    }

    /// Fetch the existing job list.
    pub async fn list_jobs(&self) -> AppResult<Vec<Job>> {
        let response = self
            .http
            .get(self.url("/rest/jobs"))
            .send()
            .await
            .map_err(|e| AppError::Api(format!("jobs request failed: {e}")))?;
        let records: Vec<JobRecord> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("bad jobs response: {e}")))?;
        records.into_iter().map(Job::try_from).collect()
    }

    /// Fetch the annotator registry.
    pub async fn list_annotators(&self) -> AppResult<HashMap<String, AnnotatorInfo>> {
        let response = self
            .http
            .get(self.url("/rest/annotators"))
            .send()
            .await
            .map_err(|e| AppError::Api(format!("annotators request failed: {e}")))?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("bad annotators response: {e}")))
    }

    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("server returned {status}: {body}")));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const JOB_BODY: &str = r#"{
        "id": "job-20240501-1030",
        "orig_input_fname": "raw-input.txt",
        "submission_time": "2024-05-01T10:30:00Z",
        "viewable": false
    }"#;

    fn options() -> SubmissionOptions {
        SubmissionOptions {
            annotators: vec!["clinvar".to_string(), "gnomad".to_string()],
            assembly: "hg38".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_sends_text_as_synthetic_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/submit")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"filename="raw-input\.txt""#.to_string()),
                Matcher::Regex("chr1 12345 A T".to_string()),
                Matcher::Regex(r#""annotators":\["clinvar","gnomad"\]"#.to_string()),
                Matcher::Regex(r#""assembly":"hg38""#.to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(JOB_BODY)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let input = InputSource::Text("chr1 12345 A T".to_string());
        let job = client.submit_job(input, &options()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(job.id, "job-20240501-1030");
        assert_eq!(job.orig_input_fname, "raw-input.txt");
        assert!(!job.viewable);
    }

    #[tokio::test]
    async fn submit_sends_selected_file_bytes_and_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/submit")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"filename="variants\.vcf""#.to_string()),
                Matcher::Regex("##fileformat=VCFv4.2".to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(JOB_BODY)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let input = InputSource::File {
            bytes: b"##fileformat=VCFv4.2\n".to_vec(),
            name: "variants.vcf".to_string(),
        };
        client.submit_job(input, &options()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn view_posts_job_id_as_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/view")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"jobId": "job-7"})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "ready"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let body = client.view_job("job-7").await.unwrap();

        mock.assert_async().await;
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn list_jobs_parses_records() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/jobs")
            .with_header("content-type", "application/json")
            .with_body(format!("[{JOB_BODY}]"))
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let jobs = client.list_jobs().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "job-20240501-1030");
    }

    #[tokio::test]
    async fn list_annotators_parses_registry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/annotators")
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "clinvar": {"name": "clinvar", "title": "ClinVar"},
                    "gnomad": {"name": "gnomad", "title": "gnomAD"}
                }"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let annotators = client.list_annotators().await.unwrap();
        assert_eq!(annotators.len(), 2);
        assert_eq!(annotators["clinvar"].title, "ClinVar");
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/jobs")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let err = client.list_jobs().await.unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
    }
}
