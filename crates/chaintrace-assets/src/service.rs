use std::sync::Arc;

use chaintrace_ledger::{Ledger, LedgerObject};

use crate::error::Result;

/// Shared entry point for all asset commands and queries.
///
/// Holds the one ledger handle and the deployed contract package id;
/// the per-asset operations live in `impl` blocks next to their
/// domain (`aircraft.rs`, `part.rs`, …).
pub struct AssetService {
    pub(crate) ledger: Arc<dyn Ledger>,
    pub(crate) package_id: String,
}

impl AssetService {
    pub fn new(ledger: Arc<dyn Ledger>, package_id: impl Into<String>) -> Self {
        Self {
            ledger,
            package_id: package_id.into(),
        }
    }

    /// Fully qualified call target for `module::function`.
    pub(crate) fn target(&self, entry: &str) -> String {
        format!("{}::{}", self.package_id, entry)
    }

    /// Fully qualified struct type for change-set and owner filters.
    pub(crate) fn type_tag(&self, suffix: &str) -> String {
        format!("{}::{}", self.package_id, suffix)
    }

    /// Fetch one asset object by id, any type.
    pub async fn get_asset(&self, id: &str) -> Result<LedgerObject> {
        Ok(self.ledger.get_object(id).await?)
    }

    pub(crate) async fn list_owned(&self, owner: &str, suffix: &str) -> Result<Vec<LedgerObject>> {
        let filter = self.type_tag(suffix);
        Ok(self
            .ledger
            .get_owned_objects(owner, Some(&filter))
            .await?)
    }
}
