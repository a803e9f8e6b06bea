use chaintrace_ledger::{CallArg, LedgerObject, Transaction};
use chrono::Utc;
use tracing::info;

use crate::error::{CommandError, Result};
use crate::service::AssetService;
use crate::types::{require_str, require_u64, ChangeStatus, CommandOutcome, CompleteFlight, CreateAircraft};

impl AssetService {
    /// Register a new aircraft. Returns the created object id.
    pub async fn create_aircraft(&self, req: CreateAircraft) -> Result<CommandOutcome> {
        let tail_number = require_str(&req.tail_number, "tail_number")?;
        let model = require_str(&req.model, "model")?;
        let manufacturer = require_str(&req.manufacturer, "manufacturer")?;
        let manufacture_date = require_u64(&req.manufacture_date, "manufacture_date")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("aircraft::create_aircraft"),
            vec![
                CallArg::string(&tail_number),
                CallArg::string(model),
                CallArg::string(manufacturer),
                CallArg::u64(manufacture_date),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        let created = response
            .created_object("::aircraft::Aircraft")
            .ok_or(CommandError::CreatedObjectMissing { type_name: "Aircraft" })?
            .to_string();

        info!(aircraft_id = %created, %tail_number, "aircraft created");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: Some(created),
        })
    }

    /// Log a completed flight against the airframe.
    pub async fn complete_flight(&self, aircraft_id: &str, req: CompleteFlight) -> Result<CommandOutcome> {
        let flight_hours = require_u64(&req.flight_hours, "flight_hours")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("aircraft::complete_flight"),
            vec![
                CallArg::object(aircraft_id),
                CallArg::u64(flight_hours),
                CallArg::u64(now_ms()),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        info!(aircraft_id, flight_hours, "flight completed");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    /// Transition the aircraft's operational status.
    pub async fn change_aircraft_status(&self, aircraft_id: &str, req: ChangeStatus) -> Result<CommandOutcome> {
        let status = require_str(&req.status, "status")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("aircraft::change_status"),
            vec![
                CallArg::object(aircraft_id),
                CallArg::string(&status),
                CallArg::u64(now_ms()),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        info!(aircraft_id, %status, "aircraft status changed");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    pub async fn list_aircraft(&self, owner: &str) -> Result<Vec<LedgerObject>> {
        self.list_owned(owner, "aircraft::Aircraft").await
    }
}

pub(crate) fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
