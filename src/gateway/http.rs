//! Multipart HTTP client for the exploits-table endpoint.

use super::SubmissionGateway;
use crate::common::config::AppConfig;
use crate::common::errors::SubmissionFailed;
use crate::session::{DownloadLink, OutputLanguage, ReportFile};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const SUBMIT_PATH: &str = "make-exploits-table";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    download_link: Option<String>,
}

/// `POST <api_url>/make-exploits-table` with `file` and `tableLanguage` parts.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, api_url))
    }

    /// Use a preconfigured client. Trailing slashes on `api_url` are ignored.
    pub fn with_client(client: Client, api_url: &str) -> Self {
        let endpoint = format!("{}/{}", api_url.trim_end_matches('/'), SUBMIT_PATH);
        Self { client, endpoint }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(file: &ReportFile, language: OutputLanguage) -> Result<Form, SubmissionFailed> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|e| {
                SubmissionFailed::new(format!("invalid media type '{}': {e}", file.media_type()))
            })?;

        Ok(Form::new()
            .part("file", part)
            .text("tableLanguage", language.as_str()))
    }
}

#[async_trait::async_trait]
impl SubmissionGateway for HttpGateway {
    #[tracing::instrument(skip_all, fields(file = file.name(), %language))]
    async fn submit(
        &self,
        file: &ReportFile,
        language: OutputLanguage,
    ) -> Result<DownloadLink, SubmissionFailed> {
        tracing::debug!(endpoint = %self.endpoint, "Posting report");
        let form = Self::form(file, language)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionFailed::new(format!("request error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionFailed::new(format!("service returned {status}")));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| SubmissionFailed::new(format!("unreadable response body: {e}")))?;

        let link = body
            .download_link
            .and_then(DownloadLink::parse)
            .ok_or_else(|| SubmissionFailed::new("response carried no downloadLink"))?;

        tracing::debug!(%link, "Service returned download link");
        Ok(link)
    }
}
