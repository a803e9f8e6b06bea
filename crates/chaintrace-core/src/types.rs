use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The kind of physical quantity a sensor measures.
///
/// The three known kinds carry demo-tuned default base values (the
/// construction/aviation contracts store fixed-point values scaled by
/// 100, so `7500` reads as 75.00 °C). Any other kind string is carried
/// through as [`SensorKind::Other`] and reports an `"unknown"` unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    Vibration,
    Pressure,
    Other(String),
}

impl SensorKind {
    /// Measurement unit string recorded on the ledger and pushed to viewers.
    pub fn unit(&self) -> &str {
        match self {
            SensorKind::Temperature => "celsius",
            SensorKind::Vibration => "hz",
            SensorKind::Pressure => "psi",
            SensorKind::Other(_) => "unknown",
        }
    }

    /// Default simulation base value, when one is known for this kind.
    ///
    /// Jobs for an [`SensorKind::Other`] kind must supply an explicit
    /// base value; there is no sensible default to invent.
    pub fn default_base_value(&self) -> Option<f64> {
        match self {
            SensorKind::Temperature => Some(7500.0), // 75.00 °C
            SensorKind::Vibration => Some(250.0),    // 2.50 Hz
            SensorKind::Pressure => Some(3500.0),    // 35.00 PSI
            SensorKind::Other(_) => None,
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Vibration => "vibration",
            SensorKind::Pressure => "pressure",
            SensorKind::Other(other) => other,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SensorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "temperature" => SensorKind::Temperature,
            "vibration" => SensorKind::Vibration,
            "pressure" => SensorKind::Pressure,
            other => SensorKind::Other(other.to_string()),
        })
    }
}

impl Serialize for SensorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SensorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Derive the stable sensor identifier for an (asset, kind) pair.
///
/// Format: `{kind}-sensor-{first 8 chars of the asset id}` — matches
/// the identifiers already recorded on chain, so history queries line
/// up across restarts.
pub fn sensor_id(kind: &SensorKind, asset_id: &str) -> String {
    let prefix: String = asset_id.chars().take(8).collect();
    format!("{kind}-sensor-{prefix}")
}

/// One telemetry sample produced for a single tick of a single job.
///
/// Immutable once produced: written to the ledger once and broadcast
/// once. `value` is the floored integer reading; anomalous values have
/// already been amplified before flooring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub sensor_id: String,
    /// Capture time, epoch milliseconds UTC.
    pub timestamp: i64,
    pub kind: SensorKind,
    pub value: i64,
    pub unit: String,
    pub is_anomaly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_lookup_known_kinds() {
        assert_eq!(SensorKind::Temperature.unit(), "celsius");
        assert_eq!(SensorKind::Vibration.unit(), "hz");
        assert_eq!(SensorKind::Pressure.unit(), "psi");
    }

    #[test]
    fn unit_lookup_unknown_kind() {
        let kind: SensorKind = "humidity".parse().unwrap();
        assert_eq!(kind, SensorKind::Other("humidity".to_string()));
        assert_eq!(kind.unit(), "unknown");
    }

    #[test]
    fn kind_round_trips_through_strings() {
        for raw in ["temperature", "vibration", "pressure", "strain"] {
            let kind: SensorKind = raw.parse().unwrap();
            assert_eq!(kind.to_string(), raw);
        }
    }

    #[test]
    fn kind_serde_uses_plain_strings() {
        let json = serde_json::to_string(&SensorKind::Vibration).unwrap();
        assert_eq!(json, r#""vibration""#);
        let back: SensorKind = serde_json::from_str(r#""pressure""#).unwrap();
        assert_eq!(back, SensorKind::Pressure);
    }

    #[test]
    fn sensor_id_truncates_long_asset_ids() {
        let id = sensor_id(&SensorKind::Temperature, "0xabcdef0123456789");
        assert_eq!(id, "temperature-sensor-0xabcdef");
    }

    #[test]
    fn sensor_id_tolerates_short_asset_ids() {
        let id = sensor_id(&SensorKind::Pressure, "0xa1");
        assert_eq!(id, "pressure-sensor-0xa1");
    }

    #[test]
    fn other_kind_has_no_default_base() {
        assert!(SensorKind::Temperature.default_base_value().is_some());
        let other: SensorKind = "strain".parse().unwrap();
        assert!(other.default_base_value().is_none());
    }
}
