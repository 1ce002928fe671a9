use crate::errors::{AppError, AppResult};
use serde_json::Value;

/// A parsed inbound position report.
///
/// `latitude`/`longitude` must coerce to finite numbers (JSON number or
/// numeric string, the device firmware is not consistent about which).
/// Everything else is device-supplied and passes through verbatim.
#[derive(Debug, Clone)]
pub struct PositionReport {
    pub timestamp: String,
    pub distance: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: String,
}

/// Coerce a JSON value into a finite f64, accepting numbers and
/// numeric strings. `inf`/`NaN` are rejected.
fn coerce_finite(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Render a pass-through field the way a spreadsheet cell would hold
/// it: strings verbatim, numbers printed, anything absent as empty.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

impl PositionReport {
    /// Parse a raw request body into a report.
    ///
    /// Fails with `InvalidPayload` if the body is not JSON or if
    /// latitude/longitude are missing or non-numeric.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let data: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidPayload(format!("Request body is not valid JSON: {}", e)))?;

        let latitude = coerce_finite(data.get("latitude"));
        let longitude = coerce_finite(data.get("longitude"));

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::InvalidPayload(
                    "Invalid latitude or longitude.".to_string(),
                ));
            }
        };

        Ok(Self {
            timestamp: cell_text(data.get("timestamp")),
            distance: cell_text(data.get("distance")),
            latitude,
            longitude,
            altitude: cell_text(data.get("altitude")),
        })
    }
}
