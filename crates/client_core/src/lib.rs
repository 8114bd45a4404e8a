use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{protocol::AnalyzeShipmentRequest, ANALYZE_SHIPMENT_PATH};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod render;
pub mod result;
pub mod session;

pub use config::{load_settings, ClientSettings};
pub use error::{AnalyzeError, ANALYSIS_FAILED_ALERT};
pub use render::{render, RenderState, ResultCards, RiskIndicator};
pub use result::AnalysisResult;
pub use session::{AnalysisOutcome, SearchSession, Submission};

/// Anything that can turn a request into an analysis outcome.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeShipmentRequest) -> AnalysisOutcome;
}

/// HTTP backend for `POST /api/analyze-shipment`.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    endpoint: Url,
}

impl AnalysisClient {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::from_settings(&ClientSettings {
            server_url: server_url.to_string(),
            ..ClientSettings::default()
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build().context("failed to build HTTP client")?,
            endpoint: analyze_endpoint(&settings.server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, request: &AnalyzeShipmentRequest) -> AnalysisOutcome {
        debug!(endpoint = %self.endpoint, tracking_id = %request.tracking_id, "posting analysis request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(AnalyzeError::request_failed)?
            .error_for_status()
            .map_err(AnalyzeError::request_failed)?;
        let body: Value = response.json().await.map_err(|err| {
            warn!(error = %err, "analysis response was not JSON");
            AnalyzeError::request_failed(err)
        })?;
        Ok(AnalysisResult::from_body(body))
    }
}

/// Joins the analysis path onto `server_url`, keeping any base path prefix.
pub fn analyze_endpoint(server_url: &str) -> Result<Url> {
    let trimmed = server_url.trim();
    let mut base =
        Url::parse(trimmed).with_context(|| format!("invalid server url '{trimmed}'"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ANALYZE_SHIPMENT_PATH.trim_start_matches('/'))
        .with_context(|| format!("cannot derive analysis endpoint from '{trimmed}'"))
}

/// Runs one submission from `session` against `backend`. Returns `None` when
/// the session rejected the submit.
pub async fn analyze<B>(session: &mut SearchSession, backend: &B) -> Option<Submission>
where
    B: AnalysisBackend + ?Sized,
{
    let submission = session.begin_submit()?;
    let outcome = backend.analyze(&submission.request).await;
    session.complete(&submission, outcome);
    Some(submission)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
