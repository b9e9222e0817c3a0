// Snapshot domain model - one polled reading of the tank instrumentation
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const UNKNOWN_STATE: &str = "UNKNOWN";

/// A process snapshot as served by `GET /api/datos`.
///
/// Every field is optional on the wire. Missing, `null` or wrongly-typed
/// values decode to the field's zero value, so any JSON object yields a
/// fully-populated snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(rename = "nivel_mm", deserialize_with = "lenient_number")]
    pub level_mm: f64,
    #[serde(rename = "volumen_l", deserialize_with = "lenient_number")]
    pub volume_l: f64,
    #[serde(rename = "temperatura", deserialize_with = "lenient_number")]
    pub temperature: f64,
    #[serde(rename = "calentador_on", deserialize_with = "lenient_bool")]
    pub heater_on: bool,
    #[serde(rename = "caudal_in", deserialize_with = "lenient_number")]
    pub flow_in: f64,
    #[serde(rename = "caudal_out", deserialize_with = "lenient_number")]
    pub flow_out: f64,
    #[serde(rename = "amperios", deserialize_with = "lenient_number")]
    pub current_amps: f64,
    #[serde(rename = "totalizador", deserialize_with = "lenient_number")]
    pub totalizer_m3: f64,
    #[serde(rename = "estado_sensor", deserialize_with = "sensor_flag")]
    pub sensor_ok: bool,
    #[serde(rename = "estado_sistema", deserialize_with = "state_label")]
    pub system_state: String,
    #[serde(rename = "alerta_fuga", deserialize_with = "lenient_bool")]
    pub leak_alert: bool,
    #[serde(rename = "tiempo_llenado", deserialize_with = "lenient_number")]
    pub fill_time_min: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub setpoint: f64,
    #[serde(rename = "rpm_bomba", deserialize_with = "lenient_number")]
    pub pump_rpm: f64,
    #[serde(rename = "posicion_valvula", deserialize_with = "lenient_number")]
    pub valve_position: f64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            level_mm: 0.0,
            volume_l: 0.0,
            temperature: 0.0,
            heater_on: false,
            flow_in: 0.0,
            flow_out: 0.0,
            current_amps: 0.0,
            totalizer_m3: 0.0,
            sensor_ok: false,
            system_state: UNKNOWN_STATE.to_string(),
            leak_alert: false,
            fill_time_min: 0.0,
            setpoint: 0.0,
            pump_rpm: 0.0,
            valve_position: 0.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("snapshot payload is not a JSON object (got {0})")]
    NotAnObject(&'static str),
    #[error("malformed snapshot payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl Snapshot {
    /// Decode a snapshot from an already-parsed JSON value.
    /// Fails only when the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let kind = match &value {
            Value::Object(_) => return Ok(serde_json::from_value(value)?),
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        };
        Err(DecodeError::NotAnObject(kind))
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

/// Upstream encodes sensor health inconsistently: `true`, `"true"` and `1`
/// all mean online. Everything else is a fault.
fn sensor_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_online_flag(&value))
}

fn is_online_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

fn state_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => s,
        _ => UNKNOWN_STATE.to_string(),
    })
}
