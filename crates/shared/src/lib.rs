pub mod domain;
pub mod error;
pub mod protocol;

/// Endpoint path for shipment analysis, relative to the backend base URL.
pub const ANALYZE_SHIPMENT_PATH: &str = "/api/analyze-shipment";
