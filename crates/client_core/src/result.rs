//! Untyped analysis response and tolerant field lookup.

use serde_json::{Number, Value};

/// Response body of a successful analysis. Any JSON shape is accepted; fields
/// are looked up by path when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    body: Value,
}

impl AnalysisResult {
    /// Wraps a decoded body. Falsy bodies (`null`, `false`, `0`, `""`) do not
    /// count as a result and yield `None`.
    pub fn from_body(body: Value) -> Option<Self> {
        if is_falsy(&body) {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Display text at `path`, or `None` when the value is missing, falsy, a
    /// boolean or structured.
    pub fn text_at(&self, path: &[&str]) -> Option<String> {
        let mut current = &self.body;
        for key in path {
            current = current.as_object()?.get(*key)?;
        }
        display_text(current)
    }

    pub fn shipment_status(&self) -> Option<String> {
        self.text_at(&["shipment", "status"])
    }

    pub fn shipment_location(&self) -> Option<String> {
        self.text_at(&["shipment", "location"])
    }

    pub fn weather_condition(&self) -> Option<String> {
        self.text_at(&["weather", "condition"])
    }

    pub fn risk_level(&self) -> Option<String> {
        self.text_at(&["weather", "risk_level"])
    }

    pub fn diagnosis(&self) -> Option<String> {
        self.text_at(&["rag_diagnosis", "diagnosis"])
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn display_text(value: &Value) -> Option<String> {
    if is_falsy(value) {
        return None;
    }
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number_text(number)),
        _ => None,
    }
}

/// Integral floats print without a fraction, so `1.0` shows as `1`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
            format!("{float:.0}")
        }
        _ => number.to_string(),
    }
}
