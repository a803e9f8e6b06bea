use chaintrace_core::SensorKind;
use serde::{Deserialize, Serialize};

/// A persisted recurring simulation job.
///
/// Keyed by (asset_id, kind) — at most one enabled job exists per key;
/// re-adding the same key replaces the stored parameters in place.
/// Owned exclusively by the simulator; callers only ever see copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimJob {
    pub asset_id: String,
    pub kind: SensorKind,
    /// Centre of the synthetic value distribution.
    pub base_value: f64,
    /// Half-width of the uniform spread around `base_value`.
    pub variance: f64,
    /// Chance per tick that the reading is flagged anomalous, 0..=1.
    pub anomaly_probability: f64,
    pub interval_ms: i64,
    pub enabled: bool,
    /// Epoch millis of the most recent fire, if any.
    pub last_run: Option<i64>,
    /// Epoch millis of the next planned fire.
    pub next_run: i64,
    pub run_count: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Optional per-job parameter overrides supplied at add time.
///
/// Anything left `None` falls back to the kind's demo-tuned default
/// (base value, 10% variance) or the configured anomaly probability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobOverrides {
    pub base_value: Option<f64>,
    pub variance: Option<f64>,
    pub anomaly_probability: Option<f64>,
}
