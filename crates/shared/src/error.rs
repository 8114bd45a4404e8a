//! Error body returned by the analysis endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Reasons the analysis endpoint refuses a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiException {
    #[error("tracking_id cannot be empty")]
    EmptyTrackingId,
    #[error(
        "live tracking is not configured on this server; use an id starting with 'DEMO' (e.g. DEMO-123)"
    )]
    LiveTrackingUnavailable,
}

impl ApiException {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyTrackingId | Self::LiveTrackingUnavailable => ErrorCode::Validation,
        }
    }
}

impl From<ApiException> for ApiError {
    fn from(err: ApiException) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
