use thiserror::Error;

/// Errors surfaced by the ledger gateway.
///
/// The gateway never retries; callers decide whether a failure is
/// retryable ([`LedgerError::Transport`]) or terminal for the request.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node executed the transaction and reported a non-success
    /// status (contract-level rejection, insufficient authorization).
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// The queried object does not exist on the ledger.
    #[error("Object not found: {id}")]
    NotFound { id: String },

    /// Network-level failure reaching the node.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("Node RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node's reply did not match the expected shape.
    #[error("Malformed node response: {0}")]
    Malformed(String),

    /// The signing credential could not be constructed.
    #[error("Invalid signing credential: {0}")]
    Credential(String),
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
