use chaintrace_ledger::LedgerError;
use thiserror::Error;

/// Errors surfaced by the asset command handlers.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required field was absent or empty. Surfaced synchronously;
    /// nothing was submitted.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// The transaction confirmed but the change-set contains no
    /// created object of the expected type.
    #[error("Transaction confirmed but no created {type_name} object in change-set")]
    CreatedObjectMissing { type_name: &'static str },

    /// Failure at the ledger boundary (rejection, not-found, transport).
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, CommandError>;
