use intake_core::config::ApiConfig;
use intake_core::{BackendReply, ExtractionBackend, SubmissionBody, TransportError};
use serde::Deserialize;

use crate::error::ClientError;
use crate::http::build_client;

const PROCESS_PATH: &str = "/api/process-documents-base64";
const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

pub struct ExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn from_config(api: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self::new(build_client(api)?, api.base_url.as_str()))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the encoded documents. Every status is returned as a reply; only
    /// failing to get a reply at all is an error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on connection failure, timeout, or an
    /// unreadable body.
    pub async fn process_documents(
        &self,
        body: &SubmissionBody,
    ) -> Result<BackendReply, ClientError> {
        let url = format!("{}{PROCESS_PATH}", self.base_url);
        tracing::debug!(%url, "posting documents");
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(BackendReply { status, body })
    }

    /// # Errors
    ///
    /// Returns `ClientError::Status` for a non-2xx reply, `ClientError::Json`
    /// for an unparseable body, or `ClientError::Http` on network failure.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl ExtractionBackend for ExtractionClient {
    async fn process(&self, body: &SubmissionBody) -> Result<BackendReply, TransportError> {
        self.process_documents(body).await.map_err(|e| {
            tracing::warn!("extraction request failed: {e}");
            TransportError::from(e)
        })
    }
}
