//! `chaintrace-ledger` — the single choke point for ledger access.
//!
//! Every read and write against the external object ledger flows
//! through the [`Ledger`] trait. The production implementation,
//! [`JsonRpcLedger`], speaks JSON-RPC 2.0 to a configured node and
//! signs each submission envelope with the one service credential held
//! by [`Signer`]. Nothing here retries: failures surface to the caller
//! with a distinguishable [`LedgerError`] kind.

pub mod api;
pub mod error;
pub mod rpc;
pub mod signer;
pub mod types;

pub use api::Ledger;
pub use error::{LedgerError, Result};
pub use rpc::JsonRpcLedger;
pub use signer::Signer;
pub use types::{CallArg, LedgerEvent, LedgerObject, MoveCall, ObjectChange, SubmitResponse, Transaction};
