use std::sync::Arc;

use chaintrace_core::Reading;
use chaintrace_ledger::{CallArg, Ledger, LedgerError, Transaction};
use chaintrace_telemetry::{TelemetryEvent, TelemetryHub};
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Executes fired ticks: reading generation, ledger submission, and
/// the post-confirmation broadcast.
///
/// Each tick runs on its own spawned task, so ticks are concurrent
/// with each other and with foreground request handling. The broadcast
/// happens-after a confirmed write for that specific reading — never
/// before it, and never when the write failed.
pub struct TickRunner {
    ledger: Arc<dyn Ledger>,
    hub: Arc<TelemetryHub>,
    package_id: String,
    amplification: f64,
}

impl TickRunner {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        hub: Arc<TelemetryHub>,
        package_id: impl Into<String>,
        amplification: f64,
    ) -> Self {
        Self {
            ledger,
            hub,
            package_id: package_id.into(),
            amplification,
        }
    }

    /// Drain fired jobs until the engine side closes the channel,
    /// spawning one task per tick.
    pub async fn run(self: Arc<Self>, mut fired_rx: mpsc::Receiver<crate::SimJob>) {
        while let Some(job) = fired_rx.recv().await {
            let runner = Arc::clone(&self);
            tokio::spawn(async move {
                runner.execute(job).await;
            });
        }
        info!("tick runner stopped — engine channel closed");
    }

    /// Run one tick end to end. Errors are isolated here: a failed
    /// tick is logged and produces no broadcast, and the job's next
    /// tick is already scheduled by the engine.
    pub async fn execute(&self, job: crate::SimJob) {
        let now_ms = Utc::now().timestamp_millis();
        let reading = {
            let mut rng = rand::thread_rng();
            crate::reading::generate_reading(&job, self.amplification, now_ms, &mut rng)
        };

        match self.submit_reading(&job.asset_id, &reading).await {
            Ok(digest) => {
                info!(
                    asset_id = %job.asset_id,
                    sensor_id = %reading.sensor_id,
                    value = reading.value,
                    unit = %reading.unit,
                    %digest,
                    "sensor reading recorded"
                );
                self.broadcast(&job.asset_id, reading);
            }
            Err(e) => {
                // No event may be published for this tick; the next
                // tick still fires on schedule.
                error!(
                    asset_id = %job.asset_id,
                    kind = %job.kind,
                    error = %e,
                    "tick submission failed — reading not broadcast"
                );
            }
        }
    }

    /// Submit one reading as a single atomic two-call transaction:
    /// construct the reading record, then attach it to the asset.
    pub async fn submit_reading(
        &self,
        asset_id: &str,
        reading: &Reading,
    ) -> Result<String, LedgerError> {
        let mut tx = Transaction::new();
        let record = tx.move_call(
            format!("{}::sensor_data::new_reading", self.package_id),
            vec![
                CallArg::string(&reading.sensor_id),
                CallArg::u64(reading.timestamp.max(0) as u64),
                CallArg::string(reading.kind.to_string()),
                // The contract stores unsigned values; clamp the floor at zero.
                CallArg::u64(reading.value.max(0) as u64),
                CallArg::string(&reading.unit),
                CallArg::bool(reading.is_anomaly),
            ],
        );
        tx.move_call(
            format!("{}::part::add_sensor_reading", self.package_id),
            vec![CallArg::object(asset_id), record],
        );

        let response = self.ledger.submit(tx).await?;
        Ok(response.digest)
    }

    /// Publish the confirmed reading, plus a distinct anomaly event
    /// when flagged.
    pub fn broadcast(&self, asset_id: &str, reading: Reading) {
        if reading.is_anomaly {
            warn!(
                asset_id,
                sensor_id = %reading.sensor_id,
                value = reading.value,
                unit = %reading.unit,
                "anomaly detected"
            );
        }
        let anomaly = reading.is_anomaly;
        self.hub
            .publish(asset_id, TelemetryEvent::reading(asset_id, reading.clone()));
        if anomaly {
            self.hub
                .publish(asset_id, TelemetryEvent::anomaly(asset_id, reading));
        }
    }
}
