use chaintrace_core::types::{sensor_id, Reading};
use rand::Rng;

use crate::types::SimJob;

/// Produce one synthetic reading for a tick of `job`.
///
/// value = base + uniform(−variance, +variance); an anomaly draw below
/// the job's probability flags the reading and multiplies the value by
/// `amplification` before flooring. The floor happens last, so the
/// amplified value is what gets truncated.
pub fn generate_reading<R: Rng>(
    job: &SimJob,
    amplification: f64,
    now_ms: i64,
    rng: &mut R,
) -> Reading {
    let raw = job.base_value + rng.gen_range(-job.variance..=job.variance);
    let is_anomaly = rng.gen::<f64>() < job.anomaly_probability;
    let value = if is_anomaly { raw * amplification } else { raw };

    Reading {
        sensor_id: sensor_id(&job.kind, &job.asset_id),
        timestamp: now_ms,
        kind: job.kind.clone(),
        value: value.floor() as i64,
        unit: job.kind.unit().to_string(),
        is_anomaly,
    }
}
