//! Demo analysis pipeline: shipment lookup, weather, handbook diagnosis and a
//! route estimate, all from a fixed catalog so no third-party keys are needed.

use shared::{
    domain::{RiskLevel, TrackingId},
    error::ApiException,
    protocol::{
        AnalysisReport, AnalyzeShipmentRequest, RagDiagnosis, RouteSummary, ShipmentInfo,
        WeatherInfo,
    },
};

const DEMO_CARRIER: &str = "dhl";
const DEMO_STATUS: &str = "in_transit";
const DIAGNOSIS_SOURCE: &str = "DHL Freight GTC";

/// Pune hub, the fixed destination for demo route estimates.
const ROUTE_DESTINATION: GeoPoint = GeoPoint {
    lat: 18.5204,
    lon: 73.8567,
};
const EARTH_RADIUS_KM: f64 = 6371.0;
const ROAD_FACTOR: f64 = 1.25;
const AVERAGE_TRUCK_SPEED_KMH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy)]
struct DemoWeather {
    condition: &'static str,
    temperature_c: f64,
    humidity_pct: f64,
    wind_speed_ms: f64,
}

#[derive(Debug, Clone, Copy)]
struct DemoSite {
    tracking_id: Option<&'static str>,
    location: &'static str,
    point: GeoPoint,
    weather: DemoWeather,
}

const DEMO_SITES: [DemoSite; 3] = [
    DemoSite {
        tracking_id: Some("DEMO-MUMBAI-001"),
        location: "Nhava Sheva Port, Mumbai (IN)",
        point: GeoPoint {
            lat: 18.9500,
            lon: 72.9500,
        },
        weather: DemoWeather {
            condition: "Rain",
            temperature_c: 29.0,
            humidity_pct: 88.0,
            wind_speed_ms: 6.1,
        },
    },
    DemoSite {
        tracking_id: Some("DEMO-DELHI-002"),
        location: "ICD Tughlakabad, New Delhi (IN)",
        point: GeoPoint {
            lat: 28.5000,
            lon: 77.2800,
        },
        weather: DemoWeather {
            condition: "Haze",
            temperature_c: 34.0,
            humidity_pct: 40.0,
            wind_speed_ms: 3.2,
        },
    },
    DemoSite {
        tracking_id: Some("DEMO-BLR-003"),
        location: "Kempegowda Air Cargo, Bengaluru (IN)",
        point: GeoPoint {
            lat: 13.1986,
            lon: 77.7066,
        },
        weather: DemoWeather {
            condition: "Storm",
            temperature_c: 24.0,
            humidity_pct: 92.0,
            wind_speed_ms: 18.4,
        },
    },
];

const FALLBACK_SITE: DemoSite = DemoSite {
    tracking_id: None,
    location: "Heathrow, London (UK)",
    point: GeoPoint {
        lat: 51.4700,
        lon: -0.4543,
    },
    weather: DemoWeather {
        condition: "Clouds",
        temperature_c: 14.0,
        humidity_pct: 72.0,
        wind_speed_ms: 5.0,
    },
};

pub fn analyze_shipment(request: &AnalyzeShipmentRequest) -> Result<AnalysisReport, ApiException> {
    let tracking_id = &request.tracking_id;
    if tracking_id.as_str().trim().is_empty() {
        return Err(ApiException::EmptyTrackingId);
    }
    if !tracking_id.is_demo() {
        return Err(ApiException::LiveTrackingUnavailable);
    }

    let site = site_for(tracking_id);
    let weather = weather_for(&site.weather);
    let rag_diagnosis = diagnose(weather.risk_level, &site.weather);
    let routing_optimization = estimate_route(site.point, ROUTE_DESTINATION);

    Ok(AnalysisReport {
        shipment: ShipmentInfo {
            tracking_id: tracking_id.clone(),
            status: DEMO_STATUS.to_string(),
            location: site.location.to_string(),
            carrier: request
                .carrier_code
                .clone()
                .unwrap_or_else(|| DEMO_CARRIER.to_string()),
        },
        weather,
        rag_diagnosis,
        routing_optimization: Some(routing_optimization),
    })
}

fn site_for(tracking_id: &TrackingId) -> DemoSite {
    DEMO_SITES
        .iter()
        .find(|site| {
            site.tracking_id
                .map(|id| id.eq_ignore_ascii_case(tracking_id.as_str()))
                .unwrap_or(false)
        })
        .copied()
        .unwrap_or(FALLBACK_SITE)
}

fn weather_for(weather: &DemoWeather) -> WeatherInfo {
    WeatherInfo {
        condition: weather.condition.to_string(),
        temperature: format!("{}°C", weather.temperature_c),
        humidity: format!("{}%", weather.humidity_pct),
        wind_speed: format!("{} m/s", weather.wind_speed_ms),
        risk_level: RiskLevel::assess(
            weather.condition,
            weather.humidity_pct,
            weather.wind_speed_ms,
        ),
    }
}

fn diagnose(risk: RiskLevel, weather: &DemoWeather) -> RagDiagnosis {
    let diagnosis = match risk {
        RiskLevel::High => format!(
            "{} conditions qualify as an obstacle to transport: the carrier may suspend or reroute the consignment and must inform the consignor without delay.",
            weather.condition
        ),
        RiskLevel::Medium => format!(
            "{} with {}% humidity requires weather-proof packaging and covered loading; the consignor remains responsible for adequate packaging.",
            weather.condition, weather.humidity_pct
        ),
        RiskLevel::Low => {
            "Current conditions fall within standard transport terms; no additional handling requirements apply."
                .to_string()
        }
    };
    RagDiagnosis {
        diagnosis,
        source: DIAGNOSIS_SOURCE.to_string(),
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lat2) = (from.lat.to_radians(), to.lat.to_radians());
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn estimate_route(from: GeoPoint, to: GeoPoint) -> RouteSummary {
    let distance_km = haversine_km(from, to) * ROAD_FACTOR;
    let time_min = distance_km / AVERAGE_TRUCK_SPEED_KMH * 60.0;
    RouteSummary {
        distance_km,
        time_min,
        summary: format!("Route of {distance_km:.2}km calculated."),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
