//! Client for the remote document-conversion service.
//!
//! Flow:
//!   POST <api_url> (multipart: file, output_format=json, mode=balanced)
//!     -> { "request_check_url": "..." }
//!   GET <request_check_url> every `poll_interval`, at most `max_polls` times
//!     -> { "status": "complete" | "failed" | ..., "error": ..., "json": {...} }

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::error::RemoteError;

pub const DEFAULT_API_URL: &str = "https://www.datalab.to/api/v1/marker";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            poll_interval: Duration::from_secs(2),
            max_polls: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_polls: u32,
}

impl RemoteConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_polls: self.max_polls,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Complete,
    Failed,
    /// Anything else ("processing", "queued", ...)
    #[default]
    #[serde(other)]
    Pending,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub error: Option<String>,
    /// Document tree, present once the job is complete
    #[serde(default)]
    pub json: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    request_check_url: Option<String>,
}

/// Call `check` until the job completes, fails, or the budget runs out.
/// Returns the document tree of the completed job.
pub async fn poll_until_complete<F, Fut>(policy: PollPolicy, mut check: F) -> Result<Value, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<CheckResponse, RemoteError>>,
{
    for attempt in 1..=policy.max_polls {
        let resp = check().await?;
        match resp.status {
            JobStatus::Complete => {
                log::debug!("conversion complete after {attempt} polls");
                return Ok(resp.json.unwrap_or_default());
            }
            JobStatus::Failed => {
                let msg = resp.error.unwrap_or_else(|| "no error message".to_string());
                return Err(RemoteError::ConversionFailed(msg));
            }
            JobStatus::Pending => {
                log::trace!("poll {attempt}/{}: pending", policy.max_polls);
                tokio::time::sleep(policy.interval).await;
            }
        }
    }

    Err(RemoteError::Timeout {
        attempts: policy.max_polls,
    })
}

pub struct RemoteClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        } else {
            log::warn!("no API key configured for {}", config.api_url);
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, config })
    }

    /// Upload a PDF; returns the URL to poll.
    pub async fn submit(&self, pdf: Vec<u8>, filename: &str) -> Result<String, RemoteError> {
        log::debug!("submitting {filename} ({} bytes) to {}", pdf.len(), self.config.api_url);

        let part = Part::bytes(pdf)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("file", part)
            .text("output_format", "json")
            .text("mode", "balanced");

        let resp = self
            .http
            .post(&self.config.api_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: SubmitResponse = resp.json().await?;
        body.request_check_url.ok_or(RemoteError::MissingCheckUrl)
    }

    async fn check(&self, url: &str) -> Result<CheckResponse, RemoteError> {
        let resp = self.http.get(url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Submit and wait for the converted document tree.
    pub async fn convert(&self, pdf: Vec<u8>, filename: &str) -> Result<Value, RemoteError> {
        let check_url = self.submit(pdf, filename).await?;
        let check_url = check_url.as_str();
        poll_until_complete(self.config.poll_policy(), move || self.check(check_url)).await
    }
}
