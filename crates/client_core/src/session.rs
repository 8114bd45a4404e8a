//! Search box state: the tracking id being edited, the demo suggestions, and
//! the outcome of the latest analysis.
//!
//! Overlapping submissions are not de-duplicated. Any completion clears the
//! in-flight flag and the last completion to arrive decides the result.

use shared::{
    domain::{DemoShipment, TrackingId},
    protocol::AnalyzeShipmentRequest,
};
use tracing::{debug, info, warn};

use crate::{
    error::AnalyzeError,
    render::{render, RenderState},
    result::AnalysisResult,
};

pub type AnalysisOutcome = Result<Option<AnalysisResult>, AnalyzeError>;

/// One accepted submission. `seq` increases per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub request: AnalyzeShipmentRequest,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    tracking_id: String,
    carrier_code: Option<String>,
    suggestions_open: bool,
    in_flight: bool,
    result: Option<AnalysisResult>,
    alert: Option<String>,
    next_seq: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    /// Mutable access for text widgets that edit in place.
    pub fn tracking_id_mut(&mut self) -> &mut String {
        &mut self.tracking_id
    }

    pub fn set_tracking_id(&mut self, text: impl Into<String>) {
        self.tracking_id = text.into();
    }

    pub fn carrier_code(&self) -> Option<&str> {
        self.carrier_code.as_deref()
    }

    pub fn set_carrier_code(&mut self, carrier_code: Option<String>) {
        self.carrier_code = carrier_code;
    }

    pub fn select_demo(&mut self, demo: &DemoShipment) {
        self.tracking_id = demo.tracking_id.to_string();
        self.suggestions_open = false;
    }

    pub fn suggestions_open(&self) -> bool {
        self.suggestions_open
    }

    pub fn toggle_suggestions(&mut self) {
        self.suggestions_open = !self.suggestions_open;
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions_open = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Starts a submission, or returns `None` and changes nothing when the
    /// tracking id is empty.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        let tracking_id = TrackingId::new(self.tracking_id.clone());
        if tracking_id.is_blank() {
            debug!("ignoring submit with empty tracking id");
            return None;
        }

        self.next_seq += 1;
        self.in_flight = true;
        self.result = None;
        self.alert = None;
        self.suggestions_open = false;

        let submission = Submission {
            seq: self.next_seq,
            request: AnalyzeShipmentRequest::new(tracking_id)
                .with_carrier_code(self.carrier_code.clone()),
        };
        info!(
            seq = submission.seq,
            tracking_id = %submission.request.tracking_id,
            "analysis submitted"
        );
        Some(submission)
    }

    /// Applies the outcome of `submission`. The in-flight flag is released on
    /// every path.
    pub fn complete(&mut self, submission: &Submission, outcome: AnalysisOutcome) {
        self.in_flight = false;
        match outcome {
            Ok(result) => {
                info!(
                    seq = submission.seq,
                    has_result = result.is_some(),
                    "analysis completed"
                );
                self.result = result;
            }
            Err(err) => {
                warn!(seq = submission.seq, error = %err, "analysis failed");
                self.result = None;
                self.alert = Some(err.alert_message().to_string());
            }
        }
    }

    pub fn view(&self) -> RenderState {
        render(self.result.as_ref(), self.in_flight)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
