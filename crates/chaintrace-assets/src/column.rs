use chaintrace_ledger::{CallArg, LedgerObject, Transaction};
use tracing::info;

use crate::aircraft::now_ms;
use crate::error::{CommandError, Result};
use crate::service::AssetService;
use crate::types::{require_str, require_u64, CommandOutcome, CreateColumn};

impl AssetService {
    /// Register a structural column with its alarm thresholds.
    ///
    /// When `building_id` is supplied, the column is attached to the
    /// building by a chained call in the same transaction, so a column
    /// can never exist half-registered.
    pub async fn create_column(&self, req: CreateColumn) -> Result<CommandOutcome> {
        let column_id = require_str(&req.column_id, "column_id")?;
        let floor_level = require_u64(&req.floor_level, "floor_level")?;
        let column_type = require_str(&req.column_type, "column_type")?;
        let material = require_str(&req.material, "material")?;
        let max_tilt = require_u64(&req.max_tilt, "max_tilt")?;
        let max_vibration = require_u64(&req.max_vibration, "max_vibration")?;
        let crack_threshold = require_u64(&req.crack_threshold, "crack_threshold")?;

        let mut tx = Transaction::new();
        let column = tx.move_call(
            self.target("column::create_column"),
            vec![
                CallArg::string(&column_id),
                CallArg::u64(floor_level),
                CallArg::string(column_type),
                CallArg::string(material),
                CallArg::u64(now_ms()),
                CallArg::u64(max_tilt),
                CallArg::u64(max_vibration),
                CallArg::u64(crack_threshold),
            ],
        );

        if let Some(building_id) = req.building_id.as_deref().filter(|s| !s.trim().is_empty()) {
            tx.move_call(
                self.target("column::attach_to_building"),
                vec![column, CallArg::address(building_id)],
            );
        }

        let response = self.ledger.submit(tx).await?;
        let created = response
            .created_object("::column::Column")
            .ok_or(CommandError::CreatedObjectMissing { type_name: "Column" })?
            .to_string();

        info!(column = %created, %column_id, "column created");
        Ok(CommandOutcome {
            digest: response.digest,
            created_object_id: Some(created),
        })
    }

    pub async fn list_columns(&self, owner: &str) -> Result<Vec<LedgerObject>> {
        self.list_owned(owner, "column::Column").await
    }
}
