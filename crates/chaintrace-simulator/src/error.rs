use thiserror::Error;

/// Errors that can occur within the simulator subsystem.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Caller-supplied job parameter failed validation. Surfaced
    /// synchronously; never retried.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
