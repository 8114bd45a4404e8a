//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{AnalyzeError, SearchSession};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend command processor disconnected (possible startup/runtime failure)"
                .to_string(),
        ),
    }
}

/// Starts an analysis for the session's current tracking id. When the command
/// cannot be queued the submission is failed on the spot, so the in-flight
/// flag is always released.
pub fn submit_analysis(session: &mut SearchSession, cmd_tx: &Sender<BackendCommand>) -> bool {
    let Some(submission) = session.begin_submit() else {
        return false;
    };
    let pending = submission.clone();
    if let Err(reason) = dispatch_backend_command(cmd_tx, BackendCommand::Analyze { submission }) {
        session.complete(&pending, Err(AnalyzeError::request_failed(reason)));
    }
    true
}
