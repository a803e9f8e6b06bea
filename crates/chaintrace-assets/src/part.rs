use chaintrace_ledger::{CallArg, LedgerObject, Transaction};
use tracing::info;

use crate::aircraft::now_ms;
use crate::error::{CommandError, Result};
use crate::service::AssetService;
use crate::types::{
    require_str, require_u64, AttachPart, CommandOutcome, CreatePart, PerformMaintenance,
    UpdateFlightHours,
};

impl AssetService {
    /// Register a new serialized part. Returns the created object id.
    pub async fn create_part(&self, req: CreatePart) -> Result<CommandOutcome> {
        let serial_number = require_str(&req.serial_number, "serial_number")?;
        let part_type = require_str(&req.part_type, "part_type")?;
        let manufacturer = require_str(&req.manufacturer, "manufacturer")?;
        let manufacture_date = require_u64(&req.manufacture_date, "manufacture_date")?;
        let maintenance_interval = require_u64(&req.maintenance_interval, "maintenance_interval")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("part::create_part"),
            vec![
                CallArg::string(&serial_number),
                CallArg::string(part_type),
                CallArg::string(manufacturer),
                CallArg::u64(manufacture_date),
                CallArg::u64(maintenance_interval),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        let created = response
            .created_object("::part::Part")
            .ok_or(CommandError::CreatedObjectMissing { type_name: "Part" })?
            .to_string();

        info!(part_id = %created, %serial_number, "part created");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: Some(created),
        })
    }

    /// Attach a part to its parent assembly within an aircraft.
    pub async fn attach_part(&self, part_id: &str, req: AttachPart) -> Result<CommandOutcome> {
        let parent_id = require_str(&req.parent_id, "parent_id")?;
        let aircraft_id = require_str(&req.aircraft_id, "aircraft_id")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("part::attach_to_parent"),
            vec![
                CallArg::object(part_id),
                CallArg::address(&parent_id),
                CallArg::address(aircraft_id),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        info!(part_id, %parent_id, "part attached");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    /// Accumulate flight hours onto the part.
    pub async fn update_part_hours(&self, part_id: &str, req: UpdateFlightHours) -> Result<CommandOutcome> {
        let additional_hours = require_u64(&req.additional_hours, "additional_hours")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("part::update_flight_hours"),
            vec![CallArg::object(part_id), CallArg::u64(additional_hours)],
        );

        let response = self.ledger.submit(tx).await?;
        info!(part_id, additional_hours, "part flight hours updated");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    /// Record a maintenance action and schedule the next one.
    pub async fn perform_maintenance(&self, part_id: &str, req: PerformMaintenance) -> Result<CommandOutcome> {
        let maintenance_type = require_str(&req.maintenance_type, "maintenance_type")?;
        let next_maintenance_hours =
            require_u64(&req.next_maintenance_hours, "next_maintenance_hours")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("part::perform_maintenance"),
            vec![
                CallArg::object(part_id),
                CallArg::string(&maintenance_type),
                CallArg::u64(now_ms()),
                CallArg::u64(next_maintenance_hours),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        info!(part_id, %maintenance_type, "maintenance performed");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    /// Return the part to active service.
    pub async fn mark_part_active(&self, part_id: &str) -> Result<CommandOutcome> {
        let mut tx = Transaction::new();
        tx.move_call(
            self.target("part::mark_active"),
            vec![CallArg::object(part_id)],
        );

        let response = self.ledger.submit(tx).await?;
        info!(part_id, "part marked active");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: None,
        })
    }

    pub async fn list_parts(&self, owner: &str) -> Result<Vec<LedgerObject>> {
        self.list_owned(owner, "part::Part").await
    }
}
