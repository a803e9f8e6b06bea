use chaintrace_core::Reading;
use serde::{Deserialize, Serialize};

/// Which kind of push event a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryEventKind {
    /// A confirmed sensor reading.
    Reading,
    /// A confirmed reading that was flagged anomalous.
    Anomaly,
}

/// One server-pushed frame, exactly as serialized onto the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub event: TelemetryEventKind,
    pub asset_id: String,
    #[serde(flatten)]
    pub reading: Reading,
}

impl TelemetryEvent {
    pub fn reading(asset_id: impl Into<String>, reading: Reading) -> Self {
        Self {
            event: TelemetryEventKind::Reading,
            asset_id: asset_id.into(),
            reading,
        }
    }

    pub fn anomaly(asset_id: impl Into<String>, reading: Reading) -> Self {
        Self {
            event: TelemetryEventKind::Anomaly,
            asset_id: asset_id.into(),
            reading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaintrace_core::SensorKind;

    fn sample_reading() -> Reading {
        Reading {
            sensor_id: "temperature-sensor-0xa1b2c3".into(),
            timestamp: 1_700_000_000_000,
            kind: SensorKind::Temperature,
            value: 7421,
            unit: "celsius".into(),
            is_anomaly: false,
        }
    }

    #[test]
    fn wire_shape_flattens_reading_fields() {
        let event = TelemetryEvent::reading("0xa1b2c3", sample_reading());
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "reading");
        assert_eq!(json["asset_id"], "0xa1b2c3");
        assert_eq!(json["sensor_id"], "temperature-sensor-0xa1b2c3");
        assert_eq!(json["kind"], "temperature");
        assert_eq!(json["value"], 7421);
        assert_eq!(json["unit"], "celsius");
        assert_eq!(json["is_anomaly"], false);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn anomaly_frames_are_tagged() {
        let mut reading = sample_reading();
        reading.is_anomaly = true;
        let event = TelemetryEvent::anomaly("0xa1b2c3", reading);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "anomaly");
        assert_eq!(json["is_anomaly"], true);
    }
}
