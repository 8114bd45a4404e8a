//! Backend commands queued from UI to backend worker.

use client_core::Submission;

pub enum BackendCommand {
    Configure { server_url: String },
    Analyze { submission: Submission },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Configure { .. } => "configure",
            BackendCommand::Analyze { .. } => "analyze",
        }
    }
}
