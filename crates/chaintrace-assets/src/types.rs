use serde::{Deserialize, Serialize};

use crate::error::{CommandError, Result};

/// Result of a confirmed command: the transaction digest and, for
/// create operations, the new object's id.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_object_id: Option<String>,
}

/// Pull a required field out of a request, rejecting absent or
/// all-whitespace strings the way the original API did.
pub(crate) fn require_str(value: &Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(CommandError::MissingField { field }),
    }
}

pub(crate) fn require_u64(value: &Option<u64>, field: &'static str) -> Result<u64> {
    value.ok_or(CommandError::MissingField { field })
}

// ── Request bodies ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAircraft {
    pub tail_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    /// Epoch millis.
    pub manufacture_date: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteFlight {
    pub flight_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeStatus {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePart {
    pub serial_number: Option<String>,
    pub part_type: Option<String>,
    pub manufacturer: Option<String>,
    pub manufacture_date: Option<u64>,
    /// Flight hours between scheduled maintenance.
    pub maintenance_interval: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachPart {
    pub parent_id: Option<String>,
    pub aircraft_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFlightHours {
    pub additional_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformMaintenance {
    pub maintenance_type: Option<String>,
    pub next_maintenance_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBuilding {
    pub building_name: Option<String>,
    pub location: Option<String>,
    pub construction_year: Option<u64>,
    pub building_type: Option<String>,
    pub num_floors: Option<u64>,
    pub seismic_zone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateColumn {
    pub column_id: Option<String>,
    pub floor_level: Option<u64>,
    pub column_type: Option<String>,
    pub material: Option<String>,
    pub max_tilt: Option<u64>,
    pub max_vibration: Option<u64>,
    pub crack_threshold: Option<u64>,
    /// When present, the new column is attached to this building in
    /// the same transaction.
    pub building_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordReading {
    pub part_id: Option<String>,
    pub sensor_id: Option<String>,
    pub reading_type: Option<String>,
    pub value: Option<u64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub is_anomaly: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_str_rejects_missing_and_blank() {
        assert!(require_str(&None, "tail_number").is_err());
        assert!(require_str(&Some("  ".into()), "tail_number").is_err());
        assert_eq!(
            require_str(&Some("N747ER".into()), "tail_number").unwrap(),
            "N747ER"
        );
    }

    #[test]
    fn require_u64_accepts_zero() {
        // `value: 0` is a legitimate sensor reading; only absence is an error.
        assert_eq!(require_u64(&Some(0), "value").unwrap(), 0);
        assert!(require_u64(&None, "value").is_err());
    }

    #[test]
    fn outcome_omits_absent_created_id() {
        let json = serde_json::to_string(&CommandOutcome {
            digest: "D1".into(),
            created_object_id: None,
        })
        .unwrap();
        assert!(!json.contains("created_object_id"));
    }
}
