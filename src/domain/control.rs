// Control command domain model
use serde_json::{json, Value};
use std::fmt;

/// Actuator addressed by a control command. The table is fixed: each target
/// has exactly one backend endpoint and body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlTarget {
    Rpm,
    Valve,
    Setpoint,
}

impl ControlTarget {
    /// Backend path the command is POSTed to.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Rpm => "/api/control/rpm",
            Self::Valve => "/api/control/valvula",
            Self::Setpoint => "/api/control/setpoint",
        }
    }

    fn body_key(self) -> &'static str {
        match self {
            Self::Rpm => "rpm",
            Self::Valve => "posicion",
            Self::Setpoint => "setpoint",
        }
    }

    /// Inclusive range of the input widget driving this target. Matches the
    /// bounds the backend enforces on its side.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Rpm => (0.0, 3000.0),
            Self::Valve => (0.0, 100.0),
            Self::Setpoint => (15.0, 100.0),
        }
    }

    /// Parse the slug used by the panel API (`rpm`, `valve`, `setpoint`).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "rpm" => Some(Self::Rpm),
            "valve" => Some(Self::Valve),
            "setpoint" => Some(Self::Setpoint),
            _ => None,
        }
    }
}

impl fmt::Display for ControlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Self::Rpm => "rpm",
            Self::Valve => "valve",
            Self::Setpoint => "setpoint",
        };
        f.write_str(slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommand {
    pub target: ControlTarget,
    pub value: f64,
}

impl ControlCommand {
    pub fn new(target: ControlTarget, value: f64) -> Self {
        Self { target, value }
    }

    /// Build a command from a committed widget value, clamped into the
    /// widget's range. Returns `None` for NaN or infinite input.
    pub fn committed(target: ControlTarget, value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let (min, max) = target.range();
        Some(Self::new(target, value.clamp(min, max)))
    }

    pub fn endpoint(&self) -> &'static str {
        self.target.endpoint()
    }

    /// JSON body expected by the backend for this command.
    pub fn payload(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.target.body_key().to_string(), json!(self.value));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_and_payload_table() {
        let rpm = ControlCommand::new(ControlTarget::Rpm, 1500.0);
        assert_eq!(rpm.endpoint(), "/api/control/rpm");
        assert_eq!(rpm.payload(), json!({ "rpm": 1500.0 }));

        let valve = ControlCommand::new(ControlTarget::Valve, 42.0);
        assert_eq!(valve.endpoint(), "/api/control/valvula");
        assert_eq!(valve.payload(), json!({ "posicion": 42.0 }));

        let setpoint = ControlCommand::new(ControlTarget::Setpoint, 55.5);
        assert_eq!(setpoint.endpoint(), "/api/control/setpoint");
        assert_eq!(setpoint.payload(), json!({ "setpoint": 55.5 }));
    }

    #[test]
    fn test_committed_clamps_into_widget_range() {
        let cmd = ControlCommand::committed(ControlTarget::Rpm, 4200.0).unwrap();
        assert_eq!(cmd.value, 3000.0);

        let cmd = ControlCommand::committed(ControlTarget::Setpoint, 3.0).unwrap();
        assert_eq!(cmd.value, 15.0);

        let cmd = ControlCommand::committed(ControlTarget::Valve, 37.5).unwrap();
        assert_eq!(cmd.value, 37.5);
    }

    #[test]
    fn test_committed_rejects_non_finite() {
        assert!(ControlCommand::committed(ControlTarget::Valve, f64::NAN).is_none());
        assert!(ControlCommand::committed(ControlTarget::Rpm, f64::INFINITY).is_none());
    }

    #[test]
    fn test_slug_round_trip() {
        for target in [ControlTarget::Rpm, ControlTarget::Valve, ControlTarget::Setpoint] {
            assert_eq!(ControlTarget::from_slug(&target.to_string()), Some(target));
        }
        assert_eq!(ControlTarget::from_slug("valvula"), None);
    }
}
