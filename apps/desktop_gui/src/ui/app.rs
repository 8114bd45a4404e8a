use std::time::Duration;

use client_core::{render::LOADING_MESSAGE, RenderState, ResultCards, RiskIndicator};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::DEMO_SHIPMENTS;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, submit_analysis};
use crate::controller::reducer::{apply_ui_event, GuiState};

pub const SETTINGS_STORAGE_KEY: &str = "freyt_desktop_settings";

const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const ACCENT_CYAN: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
const ACCENT_PURPLE: egui::Color32 = egui::Color32::from_rgb(168, 85, 247);
const RISK_HIGH: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
const RISK_LOW: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(22, 27, 34);

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub server_url: Option<String>,
}

pub struct FreytApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: GuiState,
    server_url_draft: String,
    settings_open: bool,
}

impl FreytApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url_draft: startup.server_url.clone(),
            state: GuiState::new(startup.server_url),
            settings_open: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.state, event);
        }
    }

    fn submit(&mut self) {
        submit_analysis(&mut self.state.session, &self.cmd_tx);
    }

    /// The stored URL follows once the worker answers with `ServerConfigured`.
    fn apply_server_url(&mut self) {
        let server_url = self.server_url_draft.trim().to_string();
        if let Err(reason) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Configure { server_url })
        {
            self.state.status_banner = Some(reason);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("FREYT").strong().size(20.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.state.status).small());
                if let Some(at) = self.state.last_completed_at {
                    ui.label(
                        egui::RichText::new(format!("last analysis {}", at.format("%H:%M:%S")))
                            .small()
                            .weak(),
                    );
                }
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.state.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.state.status_banner = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.settings_open;
        egui::Window::new("Backend settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Server URL");
                ui.text_edit_singleline(&mut self.server_url_draft);
                if let Some(endpoint) = &self.state.endpoint {
                    ui.label(egui::RichText::new(endpoint).small().weak());
                }
                if ui.button("Apply").clicked() {
                    self.apply_server_url();
                }
            });
        self.settings_open = open;
    }

    fn show_search(&mut self, ui: &mut egui::Ui) {
        let in_flight = self.state.session.in_flight();
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(self.state.session.tracking_id_mut())
                    .hint_text("Enter any Tracking ID (e.g. SHIP-2024-001)")
                    .desired_width(360.0),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

            let label = if in_flight { "Analyzing..." } else { "Analyze" };
            let clicked = ui
                .add_enabled(!in_flight, egui::Button::new(label).fill(ACCENT_BLUE))
                .clicked();
            if clicked || (enter_pressed && !in_flight) {
                self.submit();
            }

            let toggle = if self.state.session.suggestions_open() {
                "Try Demos ▴"
            } else {
                "Try Demos ▾"
            };
            if ui.button(toggle).clicked() {
                self.state.session.toggle_suggestions();
            }
        });

        if self.state.session.suggestions_open() {
            ui.horizontal_wrapped(|ui| {
                for demo in DEMO_SHIPMENTS.iter() {
                    if ui.button(demo.label).clicked() {
                        self.state.session.select_demo(demo);
                    }
                }
            });
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        match self.state.session.view() {
            RenderState::Idle => {}
            RenderState::Loading => {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label(LOADING_MESSAGE);
                });
            }
            RenderState::Shown(cards) => show_cards(ui, &cards),
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.state.session.alert().map(str::to_string) else {
            return;
        };
        egui::Window::new("Analysis failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert);
                if ui.button("OK").clicked() {
                    self.state.session.dismiss_alert();
                }
            });
    }
}

fn card(ui: &mut egui::Ui, accent: egui::Color32, title: &str, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, accent))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_min_width(240.0);
            ui.label(egui::RichText::new(title).strong().color(accent));
            ui.add_space(6.0);
            add(ui);
        });
}

fn show_cards(ui: &mut egui::Ui, cards: &ResultCards) {
    ui.add_space(16.0);
    ui.horizontal_wrapped(|ui| {
        card(ui, ACCENT_BLUE, "ORCHESTRATOR", |ui| {
            ui.label(egui::RichText::new("Shipment Status:").weak());
            ui.label(egui::RichText::new(&cards.status).strong().size(18.0));
            ui.label(egui::RichText::new(format!("📍 {}", cards.location)).small());
            if let Some(carrier) = &cards.details.carrier {
                ui.label(egui::RichText::new(format!("Carrier: {carrier}")).small().weak());
            }
        });

        card(ui, ACCENT_CYAN, "WEATHER AGENT", |ui| {
            ui.label(egui::RichText::new("Condition:").weak());
            ui.label(egui::RichText::new(&cards.condition).strong().size(18.0));
            let risk_color = match cards.risk_indicator {
                RiskIndicator::High => RISK_HIGH,
                RiskIndicator::Low => RISK_LOW,
            };
            ui.horizontal(|ui| {
                ui.label("Risk Level:");
                ui.label(egui::RichText::new(&cards.risk_level).strong().color(risk_color));
            });
            for value in [
                &cards.details.temperature,
                &cards.details.humidity,
                &cards.details.wind_speed,
            ]
            .into_iter()
            .flatten()
            {
                ui.label(egui::RichText::new(value).small().weak());
            }
        });
    });

    ui.add_space(12.0);
    card(ui, ACCENT_PURPLE, "RAG DIAGNOSIS", |ui| {
        let source = cards
            .details
            .diagnosis_source
            .as_deref()
            .unwrap_or("DHL Handbook v2025");
        ui.label(egui::RichText::new(source).small().weak());
        ui.label(egui::RichText::new(format!("\"{}\"", cards.diagnosis)).italics());
        if let Some(route) = &cards.details.route_summary {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(route).small());
        }
    });
}

impl eframe::App for FreytApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.vertical_centered(|ui| {
                ui.heading("Freyt: Multi-Agent RAG Logistics");
                ui.label(
                    egui::RichText::new(
                        "Track a shipment and let the agents assess weather risk against the carrier handbook.",
                    )
                    .weak(),
                );
            });
            ui.add_space(16.0);
            self.show_search(ui);
            self.show_results(ui);
        });
        if self.settings_open {
            self.show_settings_window(ctx);
        }
        self.show_alert(ctx);

        if self.state.session.in_flight() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDesktopSettings {
            server_url: Some(self.state.server_url.clone()),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
