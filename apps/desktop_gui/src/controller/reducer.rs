//! State owned by the UI thread and the transitions backend events apply to it.

use chrono::{DateTime, Local};
use client_core::SearchSession;

use crate::controller::events::{UiErrorContext, UiEvent};

#[derive(Debug, Clone, Default)]
pub struct GuiState {
    pub session: SearchSession,
    pub server_url: String,
    pub endpoint: Option<String>,
    pub status: String,
    pub status_banner: Option<String>,
    pub last_completed_at: Option<DateTime<Local>>,
}

impl GuiState {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            status: "Connecting to backend worker".to_string(),
            ..Self::default()
        }
    }
}

pub fn apply_ui_event(state: &mut GuiState, event: UiEvent) {
    match event {
        UiEvent::AnalysisFinished {
            submission,
            outcome,
        } => {
            let failed = outcome.is_err();
            state.session.complete(&submission, outcome);
            state.last_completed_at = Some(Local::now());
            state.status = if failed {
                format!("Analysis for {} failed", submission.request.tracking_id)
            } else {
                format!("Analysis for {} complete", submission.request.tracking_id)
            };
        }
        UiEvent::ServerConfigured {
            server_url,
            endpoint,
        } => {
            state.status = format!("Using {endpoint}");
            state.server_url = server_url;
            state.endpoint = Some(endpoint);
            state.status_banner = None;
        }
        UiEvent::Error(err) => {
            if err.context() == UiErrorContext::BackendStartup {
                state.endpoint = None;
            }
            state.status_banner = Some(err.banner_text());
        }
    }
}
