use serde::{Deserialize, Serialize};

/// One argument of a [`MoveCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallArg {
    /// UTF-8 string literal.
    String { value: String },
    U64 { value: u64 },
    Bool { value: bool },
    /// Ledger account/object address literal.
    Address { value: String },
    /// Reference to an object that already exists on the ledger.
    Object { id: String },
    /// The result of an earlier call in the same transaction.
    Result { call: u16 },
}

impl CallArg {
    pub fn string(value: impl Into<String>) -> Self {
        CallArg::String { value: value.into() }
    }
    pub fn u64(value: u64) -> Self {
        CallArg::U64 { value }
    }
    pub fn bool(value: bool) -> Self {
        CallArg::Bool { value }
    }
    pub fn address(value: impl Into<String>) -> Self {
        CallArg::Address { value: value.into() }
    }
    pub fn object(id: impl Into<String>) -> Self {
        CallArg::Object { id: id.into() }
    }
}

/// One contract call: `package::module::function` plus ordered args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCall {
    pub target: String,
    pub args: Vec<CallArg>,
}

/// An ordered sequence of calls submitted as one atomic envelope.
///
/// Calls may reference earlier calls' results via [`CallArg::Result`];
/// the node applies all calls or none of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub calls: Vec<MoveCall>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call and return a [`CallArg::Result`] referencing it,
    /// for use as an argument to a later call.
    pub fn move_call(&mut self, target: impl Into<String>, args: Vec<CallArg>) -> CallArg {
        let index = self.calls.len() as u16;
        self.calls.push(MoveCall {
            target: target.into(),
            args,
        });
        CallArg::Result { call: index }
    }
}

/// One entry of a transaction's object change-set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectChange {
    /// "created", "mutated", "deleted".
    #[serde(rename = "type")]
    pub change_type: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(rename = "objectId")]
    pub object_id: String,
}

/// Confirmed result of a submitted transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub digest: String,
    #[serde(rename = "objectChanges", default)]
    pub object_changes: Vec<ObjectChange>,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

impl SubmitResponse {
    /// First created object whose type ends with `type_suffix`
    /// (e.g. `"::aircraft::Aircraft"`).
    pub fn created_object(&self, type_suffix: &str) -> Option<&str> {
        self.object_changes
            .iter()
            .find(|c| c.change_type == "created" && c.object_type.ends_with(type_suffix))
            .map(|c| c.object_id.as_str())
    }
}

/// An object as returned by node queries, content left as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerObject {
    #[serde(rename = "objectId")]
    pub object_id: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(default)]
    pub owner: Option<serde_json::Value>,
    /// Contract field content, schema owned by the contracts.
    #[serde(default)]
    pub content: serde_json::Value,
}

/// An emitted contract event from the node's event store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "timestampMs", default)]
    pub timestamp_ms: Option<i64>,
    /// Decoded event payload.
    #[serde(rename = "parsedJson", default)]
    pub parsed_json: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_call_returns_result_reference() {
        let mut tx = Transaction::new();
        let first = tx.move_call("0x1::sensor_data::new_reading", vec![CallArg::u64(42)]);
        assert_eq!(first, CallArg::Result { call: 0 });

        let second = tx.move_call(
            "0x1::part::add_sensor_reading",
            vec![CallArg::object("0xdeadbeef"), first],
        );
        assert_eq!(second, CallArg::Result { call: 1 });
        assert_eq!(tx.calls.len(), 2);
        assert_eq!(tx.calls[1].args[1], CallArg::Result { call: 0 });
    }

    #[test]
    fn call_arg_wire_shape_is_tagged() {
        let json = serde_json::to_string(&CallArg::string("N747ER")).unwrap();
        assert_eq!(json, r#"{"type":"string","value":"N747ER"}"#);

        let json = serde_json::to_string(&CallArg::Result { call: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"result","call":3}"#);
    }

    #[test]
    fn created_object_matches_type_suffix() {
        let res = SubmitResponse {
            digest: "D1".into(),
            object_changes: vec![
                ObjectChange {
                    change_type: "mutated".into(),
                    object_type: "0xabc::part::Part".into(),
                    object_id: "0x1".into(),
                },
                ObjectChange {
                    change_type: "created".into(),
                    object_type: "0xabc::aircraft::Aircraft".into(),
                    object_id: "0x2".into(),
                },
            ],
            events: vec![],
        };
        assert_eq!(res.created_object("::aircraft::Aircraft"), Some("0x2"));
        assert_eq!(res.created_object("::building::Building"), None);
    }

    #[test]
    fn submit_response_parses_node_field_names() {
        let raw = r#"{
            "digest": "9xYz",
            "objectChanges": [
                {"type": "created", "objectType": "0x7::part::Part", "objectId": "0x9"}
            ],
            "events": []
        }"#;
        let res: SubmitResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(res.digest, "9xYz");
        assert_eq!(res.object_changes[0].object_id, "0x9");
    }
}
