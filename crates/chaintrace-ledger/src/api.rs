use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LedgerEvent, LedgerObject, SubmitResponse, Transaction};

/// The boundary every ledger read/write crosses.
///
/// Implementations must be `Send + Sync` so one shared handle can
/// serve concurrent request handlers and simulator ticks. The gateway
/// retries nothing itself; callers see every failure.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Sign and submit `tx` as one atomic envelope, await confirmation.
    ///
    /// Returns [`crate::LedgerError::TransactionRejected`] when the
    /// node reports a non-success status.
    async fn submit(&self, tx: Transaction) -> Result<SubmitResponse>;

    /// Fetch one object's typed content by id.
    async fn get_object(&self, id: &str) -> Result<LedgerObject>;

    /// List objects owned by `owner`, optionally filtered by type.
    async fn get_owned_objects(
        &self,
        owner: &str,
        type_filter: Option<&str>,
    ) -> Result<Vec<LedgerObject>>;

    /// Query emitted events by type, newest first when `descending`.
    async fn query_events(
        &self,
        event_type: &str,
        limit: u32,
        descending: bool,
    ) -> Result<Vec<LedgerEvent>>;
}
