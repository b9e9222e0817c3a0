// Derived state - display and alarm values computed from a snapshot
use super::snapshot::Snapshot;
use serde::Serialize;

/// Physical height of the tank in millimeters.
pub const TANK_MAX_MM: f64 = 3000.0;

/// `fill_time_min` at or above this value means the tank is draining.
pub const DRAIN_SENTINEL_MIN: f64 = 9999.0;

pub const DRAINING_PHRASE: &str = "∞ (draining)";
pub const FULL_PHRASE: &str = "FULL";

const FULL_MARKER: &str = "LLENO";
const EMPTY_MARKER: &str = "VACÍO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorStatus {
    Online,
    Fault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmColor {
    Danger,
    Warning,
    Neutral,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillTone {
    Warning,
    Success,
    Info,
}

/// Formatted display strings for each reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub level: String,
    pub volume: String,
    pub capacity: String,
    pub temperature: String,
    pub heater: &'static str,
    pub flow_in: String,
    pub flow_out: String,
    pub current: String,
    pub totalizer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedState {
    /// Level as a share of tank height. Not clamped: readings outside
    /// [0, 100] are passed through as-is.
    pub capacity_pct: f64,
    pub sensor_status: SensorStatus,
    pub alarm_color: AlarmColor,
    pub fill_phrase: String,
    pub fill_tone: FillTone,
    pub leak_banner: bool,
    pub readout: Readout,
}

pub fn derive_state(snapshot: &Snapshot) -> DerivedState {
    let capacity_pct = capacity_pct(snapshot.level_mm);
    let (fill_phrase, fill_tone) = fill_phrase(snapshot.fill_time_min);

    DerivedState {
        capacity_pct,
        sensor_status: sensor_status(snapshot.sensor_ok),
        alarm_color: alarm_color(snapshot.leak_alert, &snapshot.system_state),
        fill_phrase,
        fill_tone,
        leak_banner: snapshot.leak_alert,
        readout: readout(snapshot, capacity_pct),
    }
}

pub fn capacity_pct(level_mm: f64) -> f64 {
    level_mm * 100.0 / TANK_MAX_MM
}

pub fn sensor_status(sensor_ok: bool) -> SensorStatus {
    if sensor_ok {
        SensorStatus::Online
    } else {
        SensorStatus::Fault
    }
}

/// First match wins: leak, then full, then empty.
pub fn alarm_color(leak_alert: bool, system_state: &str) -> AlarmColor {
    if leak_alert {
        AlarmColor::Danger
    } else if system_state.contains(FULL_MARKER) {
        AlarmColor::Warning
    } else if system_state.contains(EMPTY_MARKER) {
        AlarmColor::Neutral
    } else {
        AlarmColor::Normal
    }
}

pub fn fill_phrase(fill_time_min: f64) -> (String, FillTone) {
    if fill_time_min >= DRAIN_SENTINEL_MIN {
        (DRAINING_PHRASE.to_string(), FillTone::Warning)
    } else if fill_time_min == 0.0 {
        (FULL_PHRASE.to_string(), FillTone::Success)
    } else {
        (format!("{:.1} min", fill_time_min), FillTone::Info)
    }
}

fn readout(snapshot: &Snapshot, capacity_pct: f64) -> Readout {
    Readout {
        level: format!("{:.1} mm", snapshot.level_mm),
        volume: format!("{:.1} L", snapshot.volume_l),
        capacity: format!("{:.1}%", capacity_pct),
        temperature: format!("{:.1} °C", snapshot.temperature),
        heater: if snapshot.heater_on { "ON" } else { "OFF" },
        flow_in: format!("{:.1} L/min", snapshot.flow_in),
        flow_out: format!("{:.1} L/min", snapshot.flow_out),
        current: format!("{:.2} A", snapshot.current_amps),
        totalizer: format!("{:.3} m³", snapshot.totalizer_m3),
    }
}
