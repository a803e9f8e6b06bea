use chaintrace_core::{Reading, SensorKind};
use chaintrace_ledger::{CallArg, Transaction};
use tracing::info;

use crate::aircraft::now_ms;
use crate::error::Result;
use crate::service::AssetService;
use crate::types::{require_str, require_u64, CommandOutcome, RecordReading};

impl AssetService {
    /// Record one manually supplied sensor reading against a part.
    ///
    /// Same two-call transaction as a simulator tick: construct the
    /// reading record, then attach it to the part. Returns the built
    /// [`Reading`] alongside the outcome so the caller can broadcast
    /// it after the confirmed write.
    pub async fn record_reading(&self, req: RecordReading) -> Result<(CommandOutcome, String, Reading)> {
        let part_id = require_str(&req.part_id, "part_id")?;
        let sensor_id = require_str(&req.sensor_id, "sensor_id")?;
        let reading_type = require_str(&req.reading_type, "reading_type")?;
        let value = require_u64(&req.value, "value")?;
        let unit = require_str(&req.unit, "unit")?;
        let is_anomaly = req.is_anomaly.unwrap_or(false);

        let kind: SensorKind = reading_type.parse().expect("SensorKind::from_str is infallible");
        let reading = Reading {
            sensor_id: sensor_id.clone(),
            timestamp: now_ms() as i64,
            kind,
            value: value as i64,
            unit: unit.clone(),
            is_anomaly,
        };

        let mut tx = Transaction::new();
        let record = tx.move_call(
            self.target("sensor_data::new_reading"),
            vec![
                CallArg::string(&sensor_id),
                CallArg::u64(reading.timestamp as u64),
                CallArg::string(reading_type),
                CallArg::u64(value),
                CallArg::string(unit),
                CallArg::bool(is_anomaly),
            ],
        );
        tx.move_call(
            self.target("part::add_sensor_reading"),
            vec![CallArg::object(&part_id), record],
        );

        let response = self.ledger.submit(tx).await?;
        info!(part_id = %part_id, sensor_id = %sensor_id, "sensor reading added");
        Ok((
            CommandOutcome {
                digest: response.digest,
                created_object_id: None,
            },
            part_id,
            reading,
        ))
    }

    /// Durable reading history for a part, newest first, from the
    /// ledger's event store.
    pub async fn reading_history(&self, part_id: &str, limit: u32) -> Result<Vec<serde_json::Value>> {
        let event_type = self.type_tag("part::SensorDataAdded");
        let events = self.ledger.query_events(&event_type, limit, true).await?;

        let readings = events
            .into_iter()
            .filter(|e| e.parsed_json.get("part_id").and_then(|v| v.as_str()) == Some(part_id))
            .map(|e| e.parsed_json)
            .collect();
        Ok(readings)
    }
}
