use serde_json::json;

use super::*;

fn result(body: serde_json::Value) -> AnalysisResult {
    AnalysisResult::from_body(body).expect("non-empty body")
}

#[test]
fn renders_all_present_fields_verbatim() {
    let result = result(json!({
        "shipment": { "status": "delivered", "location": "Heathrow, London (UK)" },
        "weather": { "condition": "Storm", "risk_level": "HIGH" },
        "rag_diagnosis": { "diagnosis": "Carrier may suspend transport." },
    }));

    let cards = ResultCards::from_result(&result);
    assert_eq!(cards.status, "delivered");
    assert_eq!(cards.location, "Heathrow, London (UK)");
    assert_eq!(cards.condition, "Storm");
    assert_eq!(cards.risk_level, "HIGH");
    assert_eq!(cards.risk_indicator, RiskIndicator::High);
    assert_eq!(cards.diagnosis, "Carrier may suspend transport.");
    assert_eq!(cards.details, CardDetails::default());
}

#[test]
fn renders_fallbacks_when_every_field_is_missing() {
    let cards = ResultCards::from_result(&result(json!({})));
    assert_eq!(cards.status, FALLBACK_STATUS);
    assert_eq!(cards.location, FALLBACK_LOCATION);
    assert_eq!(cards.condition, FALLBACK_CONDITION);
    assert_eq!(cards.risk_level, "LOW");
    assert_eq!(cards.risk_indicator, RiskIndicator::Low);
    assert_eq!(
        cards.diagnosis,
        "No risks identified by the knowledge base."
    );
}

#[test]
fn boolean_and_numeric_fields_render_like_the_web_card() {
    let cards = ResultCards::from_result(&result(json!({
        "shipment": { "status": true, "location": 1.0 },
    })));
    assert_eq!(cards.status, FALLBACK_STATUS);
    assert_eq!(cards.location, "1");
}

#[test]
fn only_exact_high_selects_high_risk_indicator() {
    for (risk, expected) in [
        (json!("HIGH"), RiskIndicator::High),
        (json!("MEDIUM"), RiskIndicator::Low),
        (json!("high"), RiskIndicator::Low),
        (json!(null), RiskIndicator::Low),
    ] {
        let cards = ResultCards::from_result(&result(json!({
            "weather": { "risk_level": risk.clone() },
        })));
        assert_eq!(cards.risk_indicator, expected, "risk_level {risk}");
    }
}

#[test]
fn medium_risk_is_displayed_but_uses_low_indicator() {
    let cards = ResultCards::from_result(&result(json!({
        "weather": { "risk_level": "MEDIUM" },
    })));
    assert_eq!(cards.risk_level, "MEDIUM");
    assert_eq!(cards.risk_indicator, RiskIndicator::Low);
}

#[test]
fn partial_shipment_example_fills_remaining_slots() {
    let cards = ResultCards::from_result(&result(json!({
        "shipment": { "status": "in_transit" },
    })));
    assert_eq!(cards.status, "in_transit");
    assert_eq!(cards.location, "Processing...");
    assert_eq!(cards.condition, "Clear");
    assert_eq!(cards.risk_level, "LOW");
    assert_eq!(cards.diagnosis, FALLBACK_DIAGNOSIS);
}

#[test]
fn loading_suppresses_cards_even_with_a_result() {
    let result = result(json!({ "shipment": { "status": "in_transit" } }));
    assert_eq!(render(Some(&result), true), RenderState::Loading);
    assert_eq!(render(None, true), RenderState::Loading);
}

#[test]
fn idle_when_neither_loading_nor_result() {
    let state = render(None, false);
    assert_eq!(state, RenderState::Idle);
    assert!(state.cards().is_none());
}

#[test]
fn optional_details_are_collected_when_present() {
    let cards = ResultCards::from_result(&result(json!({
        "shipment": { "carrier": "dhl" },
        "weather": { "temperature": "31°C", "humidity": "78%", "wind_speed": "4.2 m/s" },
        "rag_diagnosis": { "source": "DHL Freight GTC" },
        "routing_optimization": { "summary": "Route of 148.20km calculated." },
    })));
    assert_eq!(cards.details.carrier.as_deref(), Some("dhl"));
    assert_eq!(cards.details.temperature.as_deref(), Some("31°C"));
    assert_eq!(cards.details.humidity.as_deref(), Some("78%"));
    assert_eq!(cards.details.wind_speed.as_deref(), Some("4.2 m/s"));
    assert_eq!(cards.details.diagnosis_source.as_deref(), Some("DHL Freight GTC"));
    assert_eq!(
        cards.details.route_summary.as_deref(),
        Some("Route of 148.20km calculated.")
    );
}

#[test]
fn text_rendering_lists_the_four_slots() {
    let text = ResultCards::from_result(&result(json!({
        "weather": { "risk_level": "HIGH" },
    })))
    .to_string();
    assert!(text.contains("Shipment Status: Unknown"));
    assert!(text.contains("Location:        Processing..."));
    assert!(text.contains("Risk Level: HIGH [!!]"));
    assert!(text.contains("\"No risks identified by the knowledge base.\""));
    assert!(!text.contains("ROUTING"));
}
