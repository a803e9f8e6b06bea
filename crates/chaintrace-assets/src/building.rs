use chaintrace_ledger::{CallArg, LedgerObject, Transaction};
use tracing::info;

use crate::error::{CommandError, Result};
use crate::service::AssetService;
use crate::types::{require_str, require_u64, CommandOutcome, CreateBuilding};

impl AssetService {
    /// Register a monitored building. Returns the created object id.
    pub async fn create_building(&self, req: CreateBuilding) -> Result<CommandOutcome> {
        let building_name = require_str(&req.building_name, "building_name")?;
        let location = require_str(&req.location, "location")?;
        let construction_year = require_u64(&req.construction_year, "construction_year")?;
        let building_type = require_str(&req.building_type, "building_type")?;
        let num_floors = require_u64(&req.num_floors, "num_floors")?;
        let seismic_zone = require_str(&req.seismic_zone, "seismic_zone")?;

        let mut tx = Transaction::new();
        tx.move_call(
            self.target("building::create_building"),
            vec![
                CallArg::string(&building_name),
                CallArg::string(location),
                CallArg::u64(construction_year),
                CallArg::string(building_type),
                CallArg::u64(num_floors),
                CallArg::string(seismic_zone),
            ],
        );

        let response = self.ledger.submit(tx).await?;
        let created = response
            .created_object("::building::Building")
            .ok_or(CommandError::CreatedObjectMissing { type_name: "Building" })?
            .to_string();

        info!(building_id = %created, %building_name, "building created");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: Some(created),
        })
    }

    pub async fn list_buildings(&self, owner: &str) -> Result<Vec<LedgerObject>> {
        self.list_owned(owner, "building::Building").await
    }
}
