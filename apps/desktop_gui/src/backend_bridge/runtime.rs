//! Backend worker: owns the tokio runtime and the HTTP client, turns queued
//! commands into UI events.

use std::{sync::Arc, thread};

use client_core::{AnalysisBackend, AnalysisClient, AnalyzeError, ClientSettings};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(error = %err, "failed to build backend runtime");
                let _ = ui_tx.send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                drain_without_runtime(&cmd_rx, &ui_tx);
                return;
            }
        };

        runtime.block_on(async move {
            let mut client = match AnalysisClient::from_settings(&settings) {
                Ok(client) => Some(Arc::new(client)),
                Err(err) => {
                    let _ = ui_tx.send(UiEvent::Error(UiError::new(
                        UiErrorContext::Settings,
                        format!("{err:#}"),
                    )));
                    None
                }
            };
            if let Some(client) = &client {
                let _ = ui_tx.send(UiEvent::ServerConfigured {
                    server_url: settings.server_url.clone(),
                    endpoint: client.endpoint().to_string(),
                });
            }

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Configure { server_url } => {
                        let next = ClientSettings {
                            server_url: server_url.clone(),
                            ..settings.clone()
                        };
                        match AnalysisClient::from_settings(&next) {
                            Ok(next_client) => {
                                info!(endpoint = %next_client.endpoint(), "backend endpoint configured");
                                let _ = ui_tx.send(UiEvent::ServerConfigured {
                                    server_url,
                                    endpoint: next_client.endpoint().to_string(),
                                });
                                client = Some(Arc::new(next_client));
                            }
                            Err(err) => {
                                let _ = ui_tx.send(UiEvent::Error(UiError::new(
                                    UiErrorContext::Settings,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::Analyze { submission } => {
                        let ui_tx = ui_tx.clone();
                        let client = client.clone();
                        tokio::spawn(async move {
                            let outcome = match client {
                                Some(client) => client.analyze(&submission.request).await,
                                None => Err(AnalyzeError::request_failed(
                                    "no valid backend endpoint configured",
                                )),
                            };
                            if ui_tx
                                .send(UiEvent::AnalysisFinished { submission, outcome })
                                .is_err()
                            {
                                warn!("ui event channel closed before analysis finished");
                            }
                        });
                    }
                }
            }
        });
    });
}

/// Without a runtime every analysis fails immediately so the UI never stays
/// stuck in flight.
fn drain_without_runtime(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>) {
    while let Ok(cmd) = cmd_rx.recv() {
        if let BackendCommand::Analyze { submission } = cmd {
            let _ = ui_tx.send(UiEvent::AnalysisFinished {
                submission,
                outcome: Err(AnalyzeError::request_failed("backend runtime unavailable")),
            });
        }
    }
}
