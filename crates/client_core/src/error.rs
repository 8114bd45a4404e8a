use std::fmt::Display;

use thiserror::Error;

/// Fixed text shown to the user for any failed analysis.
pub const ANALYSIS_FAILED_ALERT: &str =
    "Failed to connect to Backend Server. Make sure it is running!";

/// Every failure mode of an analysis request collapses into this one kind.
/// The reason is kept for logs only and never changes how the UI reacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("analysis request failed: {reason}")]
    RequestFailed { reason: String },
}

impl AnalyzeError {
    pub fn request_failed(reason: impl Display) -> Self {
        Self::RequestFailed {
            reason: reason.to_string(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::RequestFailed { reason } => reason,
        }
    }

    pub fn alert_message(&self) -> &'static str {
        ANALYSIS_FAILED_ALERT
    }
}
