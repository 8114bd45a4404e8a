use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{analyze, load_settings, AnalysisClient, RenderState, SearchSession};
use shared::domain::{find_demo, DEMO_SHIPMENTS};
use tracing_subscriber::EnvFilter;

/// Submit a tracking id to the shipment analysis backend and print the cards.
#[derive(Parser, Debug)]
#[command(name = "freyt", version)]
struct Args {
    /// Tracking id to analyze (e.g. SHIP-2024-001).
    tracking_id: Option<String>,
    /// Backend base URL; overrides freyt.toml and FREYT_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    carrier_code: Option<String>,
    /// Use a preset demo shipment by city (mumbai, delhi, blr) or id.
    #[arg(long, conflicts_with = "tracking_id")]
    demo: Option<String>,
    /// Fail requests that take longer than this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the raw response body instead of the cards.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    list_demos: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    if args.list_demos {
        for demo in DEMO_SHIPMENTS {
            println!("{:<16} {}", demo.tracking_id, demo.label);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut settings = load_settings()?;
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    if args.timeout_secs.is_some() {
        settings.request_timeout_secs = args.timeout_secs;
    }
    tracing::debug!(server_url = %settings.server_url, "resolved client settings");
    let client = AnalysisClient::from_settings(&settings)?;

    let mut session = SearchSession::new();
    match &args.demo {
        Some(name) => {
            let Some(demo) = find_demo(name) else {
                bail!("unknown demo '{name}'; try --list-demos");
            };
            session.select_demo(demo);
        }
        None => session.set_tracking_id(args.tracking_id.clone().unwrap_or_default()),
    }
    session.set_carrier_code(args.carrier_code.clone());

    if analyze(&mut session, &client).await.is_none() {
        eprintln!("Enter a tracking ID (e.g. SHIP-2024-001) or pass --demo <city>.");
        return Ok(ExitCode::from(2));
    }

    let (output, code) = report(&session, args.json)?;
    print!("{output}");
    Ok(code)
}

/// Text for stdout and the exit code for a finished session.
fn report(session: &SearchSession, json: bool) -> Result<(String, ExitCode)> {
    if let Some(alert) = session.alert() {
        eprintln!("{alert}");
        return Ok((String::new(), ExitCode::FAILURE));
    }

    if json {
        let body = session
            .result()
            .map(|result| result.body().clone())
            .unwrap_or(serde_json::Value::Null);
        return Ok((
            format!("{}\n", serde_json::to_string_pretty(&body)?),
            ExitCode::SUCCESS,
        ));
    }

    let text = match session.view() {
        RenderState::Shown(cards) => cards.to_string(),
        RenderState::Idle => "No analysis returned.\n".to_string(),
        RenderState::Loading => bail!("analysis still in flight after completion"),
    };
    Ok((text, ExitCode::SUCCESS))
}

#[cfg(test)]
mod tests {
    use super::{report, Args};
    use clap::Parser;
    use client_core::{AnalysisResult, AnalyzeError, SearchSession};
    use serde_json::json;
    use std::process::ExitCode;

    fn finished_session(outcome: client_core::AnalysisOutcome) -> SearchSession {
        let mut session = SearchSession::new();
        session.set_tracking_id("DEMO-MUMBAI-001");
        let submission = session.begin_submit().expect("submission");
        session.complete(&submission, outcome);
        session
    }

    #[test]
    fn demo_and_positional_id_conflict() {
        let parsed = Args::try_parse_from(["freyt", "SHIP-1", "--demo", "delhi"]);
        assert!(parsed.is_err());

        let args = Args::try_parse_from(["freyt", "--demo", "delhi", "--json"]).expect("args");
        assert_eq!(args.demo.as_deref(), Some("delhi"));
        assert!(args.json);
    }

    #[test]
    fn report_prints_cards_for_result() {
        let session = finished_session(Ok(AnalysisResult::from_body(json!({
            "shipment": { "status": "in_transit" },
        }))));
        let (text, code) = report(&session, false).expect("report");
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(text.contains("Shipment Status: in_transit"));
        assert!(text.contains("Location:        Processing..."));
    }

    #[test]
    fn report_prints_raw_body_as_json() {
        let session = finished_session(Ok(AnalysisResult::from_body(json!({
            "weather": { "risk_level": "HIGH" },
        }))));
        let (text, _) = report(&session, true).expect("report");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(parsed["weather"]["risk_level"], "HIGH");
    }

    #[test]
    fn report_fails_after_alert() {
        let session = finished_session(Err(AnalyzeError::request_failed("refused")));
        let (text, code) = report(&session, false).expect("report");
        assert!(text.is_empty());
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn report_handles_empty_body() {
        let session = finished_session(Ok(None));
        let (text, code) = report(&session, false).expect("report");
        assert_eq!(text, "No analysis returned.\n");
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
