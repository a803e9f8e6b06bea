//! JSON-RPC 2.0 client for the ledger node facade.
//!
//! Methods: `ledger_executeTransaction`, `ledger_getObject`,
//! `ledger_getOwnedObjects`, `ledger_queryEvents`. Submission
//! envelopes carry an HMAC-SHA256 signature over the canonical call
//! JSON; the node verifies it against the registered service
//! credential.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::api::Ledger;
use crate::error::{LedgerError, Result};
use crate::signer::Signer;
use crate::types::{LedgerEvent, LedgerObject, SubmitResponse, Transaction};

pub struct JsonRpcLedger {
    http: reqwest::Client,
    url: String,
    signer: Signer,
}

impl JsonRpcLedger {
    pub fn new(url: impl Into<String>, signer: Signer) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            signer,
        }
    }

    /// The service account address all writes are attributed to.
    pub fn address(&self) -> &str {
        self.signer.address()
    }

    async fn call<P: Serialize, R: DeserializeOwned>(&self, method: &str, params: P) -> Result<R> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self.http.post(&self.url).json(&body).send().await?;
        let envelope: RpcEnvelope<R> = response.json().await?;

        if let Some(err) = envelope.error {
            error!(method, code = err.code, "node returned RPC error: {}", err.message);
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| LedgerError::Malformed(format!("{method}: missing result")))
    }
}

#[async_trait]
impl Ledger for JsonRpcLedger {
    async fn submit(&self, tx: Transaction) -> Result<SubmitResponse> {
        let calls = serde_json::to_value(&tx.calls)?;
        let canonical = serde_json::to_vec(&calls)?;
        let signature = self.signer.sign(&canonical);

        let result: ExecutionResult = self
            .call(
                "ledger_executeTransaction",
                json!([{
                    "sender": self.signer.address(),
                    "calls": calls,
                    "signature": signature,
                }]),
            )
            .await?;

        if result.status.status != "success" {
            let reason = result
                .status
                .error
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(LedgerError::TransactionRejected(reason));
        }

        debug!(digest = %result.response.digest, "transaction confirmed");
        Ok(result.response)
    }

    async fn get_object(&self, id: &str) -> Result<LedgerObject> {
        let result: ObjectResult = self.call("ledger_getObject", json!([id])).await?;
        result
            .data
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })
    }

    async fn get_owned_objects(
        &self,
        owner: &str,
        type_filter: Option<&str>,
    ) -> Result<Vec<LedgerObject>> {
        let result: OwnedObjectsResult = self
            .call(
                "ledger_getOwnedObjects",
                json!([owner, { "objectType": type_filter }]),
            )
            .await?;
        Ok(result.data)
    }

    async fn query_events(
        &self,
        event_type: &str,
        limit: u32,
        descending: bool,
    ) -> Result<Vec<LedgerEvent>> {
        let result: EventsResult = self
            .call(
                "ledger_queryEvents",
                json!([{ "eventType": event_type }, limit, descending]),
            )
            .await?;
        Ok(result.data)
    }
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RpcEnvelope<R> {
    result: Option<R>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct ExecutionStatus {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ExecutionResult {
    status: ExecutionStatus,
    #[serde(flatten)]
    response: SubmitResponse,
}

#[derive(Deserialize)]
struct ObjectResult {
    #[serde(default)]
    data: Option<LedgerObject>,
}

#[derive(Deserialize)]
struct OwnedObjectsResult {
    #[serde(default)]
    data: Vec<LedgerObject>,
}

#[derive(Deserialize)]
struct EventsResult {
    #[serde(default)]
    data: Vec<LedgerEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_result_success_parses() {
        let raw = r#"{
            "status": {"status": "success"},
            "digest": "7abc",
            "objectChanges": [],
            "events": []
        }"#;
        let result: ExecutionResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.status.status, "success");
        assert_eq!(result.response.digest, "7abc");
    }

    #[test]
    fn execution_result_failure_carries_reason() {
        let raw = r#"{
            "status": {"status": "failure", "error": "EInvalidStatus"},
            "digest": "7abc"
        }"#;
        let result: ExecutionResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.status.status, "failure");
        assert_eq!(result.status.error.as_deref(), Some("EInvalidStatus"));
    }

    #[test]
    fn rpc_envelope_error_branch_parses() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"boom"}}"#;
        let envelope: RpcEnvelope<ExecutionResult> = serde_json::from_str(raw).unwrap();
        assert!(envelope.result.is_none());
        assert_eq!(envelope.error.unwrap().code, -32000);
    }

    #[test]
    fn missing_object_data_is_none() {
        let raw = r#"{"data": null}"#;
        let result: ObjectResult = serde_json::from_str(raw).unwrap();
        assert!(result.data.is_none());
    }
}
