use axum::{http::StatusCode, response::IntoResponse, Json};
use chaintrace_assets::CommandError;
use chaintrace_ledger::LedgerError;
use chaintrace_simulator::SimulatorError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Error surface of the REST API. Every failure reaches the caller
/// with a stable kind string and an HTTP status matching the taxonomy:
/// invalid input 400, missing objects 404, contract rejection 422,
/// node unreachability 502, everything else 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// Retryable from the caller's point of view.
    #[error("Ledger transport failure: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable error code string included in every failure body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidParameter(_) => "INVALID_PARAMETER",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::TransactionRejected(_) => "TRANSACTION_REJECTED",
            ApiError::Transport(_) => "TRANSPORT_FAILURE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TransactionRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Internal(msg) => error!("request failed: {msg}"),
            other => warn!(kind = other.kind(), "request failed: {other}"),
        }
        let body = json!({
            "success": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::TransactionRejected(reason) => ApiError::TransactionRejected(reason),
            LedgerError::NotFound { id } => ApiError::NotFound(id),
            LedgerError::Transport(reason) => ApiError::Transport(reason),
            LedgerError::Rpc { code, message } => {
                ApiError::Transport(format!("node error {code}: {message}"))
            }
            LedgerError::Malformed(reason) => ApiError::Transport(reason),
            LedgerError::Credential(reason) => ApiError::Internal(reason),
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(e: CommandError) -> Self {
        match e {
            CommandError::MissingField { .. } => ApiError::InvalidParameter(e.to_string()),
            CommandError::CreatedObjectMissing { .. } => ApiError::Internal(e.to_string()),
            CommandError::Ledger(inner) => inner.into(),
        }
    }
}

impl From<SimulatorError> for ApiError {
    fn from(e: SimulatorError) -> Self {
        match e {
            SimulatorError::InvalidParameter(reason) => ApiError::InvalidParameter(reason),
            SimulatorError::Database(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}
