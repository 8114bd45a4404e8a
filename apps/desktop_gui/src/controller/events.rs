//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{AnalysisOutcome, Submission};

pub enum UiEvent {
    /// Sent exactly once per queued analysis, success or not.
    AnalysisFinished {
        submission: Submission,
        outcome: AnalysisOutcome,
    },
    /// The worker accepted `server_url`; only now does the UI adopt it.
    ServerConfigured {
        server_url: String,
        endpoint: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Settings,
}

/// Errors outside the analysis flow. Analysis failures surface as the
/// session alert instead.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn banner_text(&self) -> String {
        let label = match self.context {
            UiErrorContext::BackendStartup => "Backend startup",
            UiErrorContext::Settings => "Settings",
        };
        format!("{label}: {}", self.message)
    }
}
