//! `chaintrace-assets` — domain intents over ledger transactions.
//!
//! One handler per operation; each translates a validated request into
//! exactly one transaction (possibly several chained calls), submits
//! it through the ledger gateway, awaits confirmation, and returns the
//! digest plus any created object id pulled from the change-set.
//! Handlers never swallow errors — every failure reaches the caller
//! with a distinguishable [`CommandError`] kind.

pub mod aircraft;
pub mod building;
pub mod column;
pub mod error;
pub mod part;
pub mod sensor;
pub mod service;
pub mod types;

pub use error::{CommandError, Result};
pub use service::AssetService;
pub use types::CommandOutcome;
