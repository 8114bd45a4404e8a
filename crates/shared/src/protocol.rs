use serde::{Deserialize, Serialize};

use crate::domain::{RiskLevel, TrackingId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeShipmentRequest {
    pub tracking_id: TrackingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
}

impl AnalyzeShipmentRequest {
    pub fn new(tracking_id: TrackingId) -> Self {
        Self {
            tracking_id,
            carrier_code: None,
        }
    }

    pub fn with_carrier_code(mut self, carrier_code: Option<String>) -> Self {
        self.carrier_code = carrier_code.filter(|code| !code.trim().is_empty());
        self
    }
}

/// Typed response emitted by the demo backend. Clients read the body untyped,
/// so every field here is optional on their side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub shipment: ShipmentInfo,
    pub weather: WeatherInfo,
    pub rag_diagnosis: RagDiagnosis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_optimization: Option<RouteSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentInfo {
    pub tracking_id: TrackingId,
    pub status: String,
    pub location: String,
    pub carrier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub condition: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagDiagnosis {
    pub diagnosis: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub time_min: f64,
    pub summary: String,
}
