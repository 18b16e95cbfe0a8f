//! Transaction, table delta and trace responses.

use super::de::number_or_string;
use super::{parse_timestamp, Abi, Action, Dynamic, PermissionLevel, ResponseMeta};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `/v2/history/get_transaction`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetTransactionResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub executed: bool,
    pub trx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_lib: Option<bool>,
    pub actions: Vec<Action>,
}

impl GetTransactionResponse {
    pub fn block_num(&self) -> Option<u64> {
        self.actions.first().map(|a| a.block_num)
    }

    /// The transaction is final when its block is at or below the reported LIB.
    pub fn is_irreversible(&self) -> bool {
        match (self.block_num(), self.meta.lib) {
            (Some(block), Some(lib)) => block <= lib,
            _ => false,
        }
    }
}

/// Contract table row change.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Delta {
    pub timestamp: String,
    pub code: String,
    pub scope: String,
    pub table: String,
    pub primary_key: String,
    pub payer: String,
    /// `true`/`1` when the row exists after the change, `false`/`0` on removal.
    pub present: Dynamic,
    pub block_num: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub data: Dynamic,
}

impl Delta {
    pub fn is_present(&self) -> bool {
        match &self.present {
            Dynamic::Bool(b) => *b,
            Dynamic::Number(n) => n.as_u64().is_some_and(|n| n != 0),
            Dynamic::String(s) => s == "true" || s == "1",
            Dynamic::Absent | Dynamic::Structured(_) => false,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// `/v2/history/get_deltas`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetDeltasResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub deltas: Vec<Delta>,
}

/// `/v2/history/get_abi_snapshot`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AbiSnapshot {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_num: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<Abi>,
}

/// Action inside a trace API transaction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TraceAction {
    pub action_ordinal: u32,
    pub creator_action_ordinal: u32,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub receipt: Dynamic,
    pub receiver: String,
    pub account: String,
    pub action: String,
    pub authorization: Vec<PermissionLevel>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub data: Dynamic,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub return_value: Dynamic,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TransactionTrace {
    pub id: String,
    pub status: String,
    pub cpu_usage_us: u32,
    pub net_usage_words: u32,
    pub signatures: Vec<String>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub transaction_header: Dynamic,
    pub actions: Vec<TraceAction>,
}

/// `/v1/trace_api/get_block`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BlockTrace {
    pub id: String,
    #[serde(with = "number_or_string")]
    pub number: u64,
    pub previous_id: String,
    pub status: String,
    pub timestamp: String,
    pub producer: String,
    pub transaction_mroot: String,
    pub action_mroot: String,
    pub schedule_version: u32,
    pub transactions: Vec<TransactionTrace>,
}

impl BlockTrace {
    pub fn action_count(&self) -> usize {
        self.transactions.iter().map(|t| t.actions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delta_presence_variants() {
        let deltas: GetDeltasResponse = serde_json::from_value(json!({
            "lib": 90,
            "deltas": [
                {"code": "eosio.token", "scope": "alice", "table": "accounts", "primary_key": "5459781", "payer": "alice", "present": 1, "block_num": 80},
                {"code": "eosio.token", "scope": "alice", "table": "accounts", "primary_key": "5459781", "payer": "alice", "present": false, "block_num": 81},
                {"code": "eosio.token", "scope": "alice", "table": "accounts", "primary_key": "5459781", "payer": "alice", "present": true, "block_num": 82,
                 "data": {"balance": "1.0000 EOS"}}
            ]
        }))
        .expect("deserialize");
        let presence: Vec<_> = deltas.deltas.iter().map(Delta::is_present).collect();
        assert_eq!(presence, [true, false, true]);
        assert_eq!(deltas.meta.lib, Some(90));
        assert_eq!(deltas.deltas[2].data.get("balance"), Some(&json!("1.0000 EOS")));
    }

    #[test]
    fn transaction_irreversibility() {
        let trx: GetTransactionResponse = serde_json::from_value(json!({
            "executed": true,
            "trx_id": "abc",
            "lib": 100,
            "actions": [{"block_num": 99, "trx_id": "abc", "act": {"account": "eosio", "name": "noop"}}]
        }))
        .expect("deserialize");
        assert_eq!(trx.block_num(), Some(99));
        assert!(trx.is_irreversible());

        let pending = GetTransactionResponse {
            meta: ResponseMeta {
                lib: Some(98),
                ..Default::default()
            },
            ..trx
        };
        assert!(!pending.is_irreversible());
    }

    #[test]
    fn block_trace_counts_actions() {
        let trace: BlockTrace = serde_json::from_value(json!({
            "id": "0000000b",
            "number": "11",
            "previous_id": "0000000a",
            "status": "irreversible",
            "timestamp": "2024-01-01T00:00:00.500Z",
            "producer": "eosnationftw",
            "transactions": [{
                "id": "abc",
                "status": "executed",
                "actions": [
                    {"action_ordinal": 1, "receiver": "eosio.token", "account": "eosio.token", "action": "transfer"},
                    {"action_ordinal": 2, "creator_action_ordinal": 1, "receiver": "alice", "account": "eosio.token", "action": "transfer"}
                ]
            }]
        }))
        .expect("deserialize");
        assert_eq!(trace.number, 11);
        assert_eq!(trace.action_count(), 2);
    }
}
