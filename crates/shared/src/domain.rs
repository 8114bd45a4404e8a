use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(pub String);

impl TrackingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty identifier. Whitespace counts as content.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_demo(&self) -> bool {
        self.0
            .get(..4)
            .map(|prefix| prefix.eq_ignore_ascii_case("demo"))
            .unwrap_or(false)
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TrackingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

const HIGH_RISK_CONDITIONS: [&str; 4] = ["Storm", "Extreme", "Tornado", "Hurricane"];
const MEDIUM_RISK_CONDITIONS: [&str; 3] = ["Rain", "Snow", "Drizzle"];
const MEDIUM_RISK_HUMIDITY_PCT: f64 = 85.0;
const MEDIUM_RISK_WIND_MS: f64 = 15.0;

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Coarse logistics risk for a weather observation.
    pub fn assess(condition: &str, humidity_pct: f64, wind_speed_ms: f64) -> Self {
        if HIGH_RISK_CONDITIONS.contains(&condition) {
            return Self::High;
        }
        if MEDIUM_RISK_CONDITIONS.contains(&condition)
            || humidity_pct > MEDIUM_RISK_HUMIDITY_PCT
            || wind_speed_ms > MEDIUM_RISK_WIND_MS
        {
            return Self::Medium;
        }
        Self::Low
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoShipment {
    pub label: &'static str,
    pub tracking_id: &'static str,
}

pub const DEMO_SHIPMENTS: [DemoShipment; 3] = [
    DemoShipment {
        label: "MUMBAI (Demo)",
        tracking_id: "DEMO-MUMBAI-001",
    },
    DemoShipment {
        label: "DELHI (Demo)",
        tracking_id: "DEMO-DELHI-002",
    },
    DemoShipment {
        label: "BLR (Demo)",
        tracking_id: "DEMO-BLR-003",
    },
];

/// Looks a demo up by label prefix (`mumbai`) or by full tracking id.
pub fn find_demo(name: &str) -> Option<&'static DemoShipment> {
    let needle = name.trim();
    if needle.is_empty() {
        return None;
    }
    DEMO_SHIPMENTS.iter().find(|demo| {
        demo.tracking_id.eq_ignore_ascii_case(needle)
            || demo
                .label
                .split_whitespace()
                .next()
                .map(|city| city.eq_ignore_ascii_case(needle))
                .unwrap_or(false)
    })
}
