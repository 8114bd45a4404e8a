use std::{sync::Arc, time::Duration};

use super::*;
use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::json;
use shared::domain::TrackingId;
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

type CapturedBody = Arc<Mutex<Option<oneshot::Sender<Value>>>>;

async fn serve(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_analysis_server(reply: Value) -> Result<(String, oneshot::Receiver<Value>)> {
    let (tx, rx) = oneshot::channel();
    let captured: CapturedBody = Arc::new(Mutex::new(Some(tx)));
    let app = Router::new().route(
        "/api/analyze-shipment",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            let reply = reply.clone();
            async move {
                if let Some(tx) = captured.lock().await.take() {
                    let _ = tx.send(body);
                }
                Json(reply)
            }
        }),
    );
    Ok((serve(app).await?, rx))
}

async fn spawn_raw_server(status: StatusCode, body: &'static str) -> Result<String> {
    let app = Router::new().route(
        "/api/analyze-shipment",
        post(move || async move { (status, body).into_response() }),
    );
    serve(app).await
}

async fn unreachable_server_url() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

fn request(tracking_id: &str) -> AnalyzeShipmentRequest {
    AnalyzeShipmentRequest::new(TrackingId::from(tracking_id))
}

struct FixedBackend(AnalysisOutcome);

#[async_trait]
impl AnalysisBackend for FixedBackend {
    async fn analyze(&self, _request: &AnalyzeShipmentRequest) -> AnalysisOutcome {
        self.0.clone()
    }
}

struct PanicOnCallBackend;

#[async_trait]
impl AnalysisBackend for PanicOnCallBackend {
    async fn analyze(&self, _request: &AnalyzeShipmentRequest) -> AnalysisOutcome {
        panic!("backend must not be called");
    }
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    assert_eq!(
        analyze_endpoint("http://127.0.0.1:8000").expect("url").as_str(),
        "http://127.0.0.1:8000/api/analyze-shipment"
    );
    assert_eq!(
        analyze_endpoint("http://gateway.local/freyt").expect("url").as_str(),
        "http://gateway.local/freyt/api/analyze-shipment"
    );
    assert_eq!(
        analyze_endpoint(" http://gateway.local/freyt/ ").expect("url").as_str(),
        "http://gateway.local/freyt/api/analyze-shipment"
    );
    assert!(analyze_endpoint("not a url").is_err());
}

#[tokio::test]
async fn posts_tracking_id_and_returns_body() {
    let (server_url, body_rx) =
        spawn_analysis_server(json!({ "shipment": { "status": "in_transit" } }))
            .await
            .expect("spawn server");
    let client = AnalysisClient::new(&server_url).expect("client");

    let result = client
        .analyze(&request("DEMO-MUMBAI-001"))
        .await
        .expect("analysis")
        .expect("result");

    assert_eq!(
        body_rx.await.expect("body"),
        json!({ "tracking_id": "DEMO-MUMBAI-001" })
    );
    assert_eq!(result.shipment_status().as_deref(), Some("in_transit"));
}

#[tokio::test]
async fn forwards_optional_carrier_code() {
    let (server_url, body_rx) = spawn_analysis_server(json!({}))
        .await
        .expect("spawn server");
    let client = AnalysisClient::new(&server_url).expect("client");

    client
        .analyze(&request("SHIP-2024-001").with_carrier_code(Some("dhl".to_string())))
        .await
        .expect("analysis");

    assert_eq!(
        body_rx.await.expect("body"),
        json!({ "tracking_id": "SHIP-2024-001", "carrier_code": "dhl" })
    );
}

#[tokio::test]
async fn non_success_status_is_a_request_failure() {
    let server_url = spawn_raw_server(StatusCode::BAD_REQUEST, r#"{"detail":"bad id"}"#)
        .await
        .expect("spawn server");
    let client = AnalysisClient::new(&server_url).expect("client");

    let err = client
        .analyze(&request("SHIP-2024-001"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::RequestFailed { .. }));
    assert_eq!(err.alert_message(), ANALYSIS_FAILED_ALERT);
}

#[tokio::test]
async fn non_json_body_is_a_request_failure() {
    let server_url = spawn_raw_server(StatusCode::OK, "<html>gateway</html>")
        .await
        .expect("spawn server");
    let client = AnalysisClient::new(&server_url).expect("client");

    let err = client
        .analyze(&request("SHIP-2024-001"))
        .await
        .expect_err("must fail");
    assert_eq!(err.alert_message(), ANALYSIS_FAILED_ALERT);
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    let client = AnalysisClient::new(&unreachable_server_url().await).expect("client");
    let err = client
        .analyze(&request("SHIP-2024-001"))
        .await
        .expect_err("must fail");
    assert!(!err.reason().is_empty());
}

#[tokio::test]
async fn configured_timeout_fails_slow_responses() {
    let app = Router::new().route(
        "/api/analyze-shipment",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let server_url = serve(app).await.expect("spawn server");
    let client = AnalysisClient::from_settings(&ClientSettings {
        server_url,
        request_timeout_secs: Some(1),
    })
    .expect("client");

    assert!(client.analyze(&request("SHIP-2024-001")).await.is_err());
}

#[tokio::test]
async fn analyze_drives_session_through_success() {
    let (server_url, _body_rx) = spawn_analysis_server(json!({
        "shipment": { "status": "in_transit", "location": "Heathrow, London (UK)" },
        "weather": { "condition": "Rain", "risk_level": "MEDIUM" },
    }))
    .await
    .expect("spawn server");
    let client = AnalysisClient::new(&server_url).expect("client");

    let mut session = SearchSession::new();
    session.set_tracking_id("DEMO-MUMBAI-001");
    let submission = analyze(&mut session, &client).await.expect("submitted");

    assert_eq!(submission.seq, 1);
    assert!(!session.in_flight());
    let state = session.view();
    let cards = state.cards().expect("cards");
    assert_eq!(cards.location, "Heathrow, London (UK)");
    assert_eq!(cards.risk_level, "MEDIUM");
    assert_eq!(cards.risk_indicator, RiskIndicator::Low);
}

#[tokio::test]
async fn analyze_releases_in_flight_after_failure() {
    let client = AnalysisClient::new(&unreachable_server_url().await).expect("client");
    let mut session = SearchSession::new();
    session.set_tracking_id("SHIP-2024-001");

    analyze(&mut session, &client).await.expect("submitted");

    assert!(!session.in_flight());
    assert!(session.result().is_none());
    assert_eq!(session.alert(), Some(ANALYSIS_FAILED_ALERT));
}

#[tokio::test]
async fn analyze_skips_backend_for_empty_tracking_id() {
    let mut session = SearchSession::new();
    assert!(analyze(&mut session, &PanicOnCallBackend).await.is_none());
    assert_eq!(session.view(), RenderState::Idle);
}

#[tokio::test]
async fn failure_discards_previous_result() {
    let mut session = SearchSession::new();
    session.set_tracking_id("SHIP-2024-001");

    let ok = FixedBackend(Ok(AnalysisResult::from_body(json!({ "shipment": {} }))));
    analyze(&mut session, &ok).await.expect("submitted");
    assert!(session.result().is_some());

    let failing = FixedBackend(Err(AnalyzeError::request_failed("reset by peer")));
    analyze(&mut session, &failing).await.expect("submitted");
    assert!(session.result().is_none());
    assert!(session.alert().is_some());
}
