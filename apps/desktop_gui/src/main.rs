mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use clap::Parser;
use client_core::{load_settings, ClientSettings};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use ui::{FreytApp, PersistedDesktopSettings, StartupConfig, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
#[command(name = "freyt-desktop")]
struct Args {
    /// Backend base URL; wins over the stored and configured URL.
    #[arg(long)]
    server_url: Option<String>,
}

/// CLI flag, then the URL stored by the last session, then client settings.
fn resolve_server_url(
    flag: Option<String>,
    persisted: Option<PersistedDesktopSettings>,
    settings: &ClientSettings,
) -> String {
    flag.or_else(|| persisted.and_then(|stored| stored.server_url))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| settings.server_url.clone())
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings().unwrap_or_else(|err| {
        warn!(error = %format!("{err:#}"), "falling back to default client settings");
        ClientSettings::default()
    });

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Freyt Logistics")
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Freyt Logistics",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            let server_url = resolve_server_url(args.server_url, persisted, &settings);
            backend_bridge::runtime::launch(
                cmd_rx,
                ui_tx,
                ClientSettings {
                    server_url: server_url.clone(),
                    ..settings
                },
            );
            Ok(Box::new(FreytApp::new(
                cmd_tx,
                ui_rx,
                StartupConfig { server_url },
            )))
        }),
    )
}
