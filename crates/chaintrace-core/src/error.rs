use thiserror::Error;

/// Process-level errors shared across crates.
///
/// Subsystems define their own error enums (`LedgerError`,
/// `SimulatorError`, `CommandError`); this type covers startup and
/// configuration failures that have no better home.
#[derive(Debug, Error)]
pub enum ChaintraceError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The signing credential is required for every write path, so a
    /// missing credential aborts startup rather than failing per request.
    #[error("Signing credential missing: {0}")]
    CredentialMissing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChaintraceError>;
