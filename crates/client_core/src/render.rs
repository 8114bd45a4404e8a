//! Maps the current result and in-flight flag onto what the UI shows.

use std::fmt;

use crate::result::AnalysisResult;

pub const FALLBACK_STATUS: &str = "Unknown";
pub const FALLBACK_LOCATION: &str = "Processing...";
pub const FALLBACK_CONDITION: &str = "Clear";
pub const FALLBACK_RISK_LEVEL: &str = "LOW";
pub const FALLBACK_DIAGNOSIS: &str = "No risks identified by the knowledge base.";

pub const LOADING_MESSAGE: &str = "Agents are coordinating...";

const HIGH_RISK_LABEL: &str = "HIGH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskIndicator {
    High,
    Low,
}

/// Optional extras shown under the fixed slots when the backend sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub carrier: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub wind_speed: Option<String>,
    pub diagnosis_source: Option<String>,
    pub route_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCards {
    pub status: String,
    pub location: String,
    pub condition: String,
    pub risk_level: String,
    pub risk_indicator: RiskIndicator,
    pub diagnosis: String,
    pub details: CardDetails,
}

impl ResultCards {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let risk_level = result.risk_level();
        let risk_indicator = if risk_level.as_deref() == Some(HIGH_RISK_LABEL) {
            RiskIndicator::High
        } else {
            RiskIndicator::Low
        };

        Self {
            status: result
                .shipment_status()
                .unwrap_or_else(|| FALLBACK_STATUS.to_string()),
            location: result
                .shipment_location()
                .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
            condition: result
                .weather_condition()
                .unwrap_or_else(|| FALLBACK_CONDITION.to_string()),
            risk_level: risk_level.unwrap_or_else(|| FALLBACK_RISK_LEVEL.to_string()),
            risk_indicator,
            diagnosis: result
                .diagnosis()
                .unwrap_or_else(|| FALLBACK_DIAGNOSIS.to_string()),
            details: CardDetails {
                carrier: result.text_at(&["shipment", "carrier"]),
                temperature: result.text_at(&["weather", "temperature"]),
                humidity: result.text_at(&["weather", "humidity"]),
                wind_speed: result.text_at(&["weather", "wind_speed"]),
                diagnosis_source: result.text_at(&["rag_diagnosis", "source"]),
                route_summary: result.text_at(&["routing_optimization", "summary"]),
            },
        }
    }
}

impl fmt::Display for ResultCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ORCHESTRATOR")?;
        writeln!(f, "  Shipment Status: {}", self.status)?;
        writeln!(f, "  Location:        {}", self.location)?;
        if let Some(carrier) = &self.details.carrier {
            writeln!(f, "  Carrier:         {carrier}")?;
        }
        writeln!(f)?;

        writeln!(f, "WEATHER AGENT")?;
        writeln!(f, "  Condition:  {}", self.condition)?;
        let marker = match self.risk_indicator {
            RiskIndicator::High => "!!",
            RiskIndicator::Low => "ok",
        };
        writeln!(f, "  Risk Level: {} [{marker}]", self.risk_level)?;
        for (label, value) in [
            ("Temperature", &self.details.temperature),
            ("Humidity", &self.details.humidity),
            ("Wind", &self.details.wind_speed),
        ] {
            if let Some(value) = value {
                writeln!(f, "  {label}: {value}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "RAG DIAGNOSIS")?;
        writeln!(f, "  \"{}\"", self.diagnosis)?;
        if let Some(source) = &self.details.diagnosis_source {
            writeln!(f, "  source: {source}")?;
        }

        if let Some(route) = &self.details.route_summary {
            writeln!(f)?;
            writeln!(f, "ROUTING")?;
            writeln!(f, "  {route}")?;
        }
        Ok(())
    }
}

/// The three mutually exclusive things the result area can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Loading,
    Shown(ResultCards),
}

impl RenderState {
    pub fn cards(&self) -> Option<&ResultCards> {
        match self {
            Self::Shown(cards) => Some(cards),
            Self::Idle | Self::Loading => None,
        }
    }
}

pub fn render(result: Option<&AnalysisResult>, in_flight: bool) -> RenderState {
    if in_flight {
        return RenderState::Loading;
    }
    match result {
        Some(result) => RenderState::Shown(ResultCards::from_result(result)),
        None => RenderState::Idle,
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
