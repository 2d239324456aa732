//! HTTP captioning collaborator.
//!
//! Talks JSON to a caption backend exposing:
//! - `POST /api/subtitles` with `{"url", "lang"}`
//! - `GET /api/languages`
//! - `GET /api/health`

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::payload::{CaptionRequest, CaptionResponse};
use crate::service::CaptionService;

/// Where the caption backend lives and how long we're willing to wait for it.
#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    /// Base URL, e.g. `http://localhost:3000`. A trailing `/` is fine.
    pub base_url: String,

    /// Per-request timeout. `None` waits as long as the backend takes.
    pub timeout: Option<Duration>,
}

impl Default for HttpServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
            timeout: None,
        }
    }
}

/// A language entry as listed by `GET /api/languages`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// [`CaptionService`] backed by a JSON-over-HTTP caption backend.
#[derive(Debug, Clone)]
pub struct HttpCaptionService {
    client: Client,
    base_url: String,
}

impl HttpCaptionService {
    pub fn new(config: HttpServiceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| Error::msg(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Languages the backend offers.
    pub async fn languages(&self) -> Result<Vec<LanguageInfo>> {
        let resp = self
            .client
            .get(self.endpoint("api/languages"))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Ask the backend whether it's up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let resp = self
            .client
            .get(self.endpoint("api/health"))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl CaptionService for HttpCaptionService {
    async fn fetch_captions(&self, request: &CaptionRequest) -> Result<CaptionResponse> {
        let url = self.endpoint("api/subtitles");
        debug!(%url, lang = %request.lang, "requesting captions");

        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|err| {
                Error::Collaborator(format!("caption service sent an unreadable response: {err}"))
            });
        }

        let message = failure_message(status, &body);
        warn!(%status, %message, "caption service rejected request");
        Err(Error::Collaborator(message))
    }
}

/// The backend's `message` from an error body, or a generic line naming the status.
fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<CaptionResponse>(body)
        .ok()
        .and_then(|resp| resp.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Error getting subtitles (HTTP {})", status.as_u16()))
}
