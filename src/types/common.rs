//! Shapes shared by several API areas: the v2 response envelope, authorities,
//! actions and token amounts.

use super::de::number_or_string;
use super::Dynamic;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parses an EOSIO timestamp such as `2024-01-01T00:00:00`, `2024-01-01T00:00:00.500`
/// or `2024-01-01T00:00:00.000Z`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Metadata Hyperion attaches to `/v2` responses.
///
/// Embedded into every v2 response type with `#[serde(flatten)]`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot_only: Option<bool>,
    /// Last irreversible block known to the indexer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_indexed_block: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_indexed_block_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Total>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<bool>,
}

impl ResponseMeta {
    /// Wire names of the envelope fields.
    pub const WIRE_FIELDS: &'static [&'static str] = &[
        "query_time_ms",
        "cached",
        "hot_only",
        "lib",
        "last_indexed_block",
        "last_indexed_block_time",
        "total",
        "more",
    ];
}

/// Hit count of a paginated query.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Total {
    pub value: u64,
    /// `eq` for an exact count, `gte` for a lower bound.
    pub relation: String,
}

impl Total {
    pub fn is_exact(&self) -> bool {
        self.relation == "eq"
    }
}

/// Token amount with its symbol, e.g. `1.0000 EOS`.
///
/// Serialized as its string form; see `token_helpers` for parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Amount in the smallest unit (`1.0000 EOS` is `10000`).
    pub amount: i64,
    pub symbol: Symbol,
}

/// Token symbol: precision and code, written `4,EOS`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub precision: u8,
    pub code: String,
}

/// `actor@permission`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermissionLevel {
    pub actor: String,
    pub permission: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyWeight {
    pub key: String,
    pub weight: u16,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermissionLevelWeight {
    pub permission: PermissionLevel,
    pub weight: u16,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct WaitWeight {
    pub wait_sec: u32,
    pub weight: u16,
}

/// Weighted-threshold signing policy.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<PermissionLevelWeight>,
    pub waits: Vec<WaitWeight>,
}

impl Authority {
    /// Sum of all weights; the authority can be satisfied only if this reaches
    /// the threshold.
    pub fn total_weight(&self) -> u32 {
        let keys = self.keys.iter().map(|k| u32::from(k.weight));
        let accounts = self.accounts.iter().map(|a| u32::from(a.weight));
        let waits = self.waits.iter().map(|w| u32::from(w.weight));
        keys.chain(accounts).chain(waits).sum()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkedAction {
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Named permission of an account.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Permission {
    pub perm_name: String,
    pub parent: String,
    pub required_auth: Authority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linked_actions: Vec<LinkedAction>,
}

/// The one canonical "list of account names" response.
///
/// Returned by key lookups (`/v2/state/get_key_accounts`).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AccountNames {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub account_names: Vec<String>,
}

/// Contract call carried by an action.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActionBody {
    pub account: String,
    pub name: String,
    pub authorization: Vec<PermissionLevel>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub data: Dynamic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_data: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AuthSequence {
    pub account: String,
    #[serde(with = "number_or_string")]
    pub sequence: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActionReceipt {
    pub receiver: String,
    #[serde(with = "number_or_string")]
    pub global_sequence: u64,
    #[serde(with = "number_or_string")]
    pub recv_sequence: u64,
    pub auth_sequence: Vec<AuthSequence>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AccountRamDelta {
    pub account: String,
    pub delta: i64,
}

/// Indexed action as returned by the v2 history endpoints.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Action {
    #[serde(rename = "@timestamp")]
    pub indexed_at: String,
    pub timestamp: String,
    pub block_num: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub trx_id: String,
    pub act: ActionBody,
    pub receipts: Vec<ActionReceipt>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub account_ram_deltas: Vec<AccountRamDelta>,
    #[serde(with = "number_or_string")]
    pub global_sequence: u64,
    pub producer: String,
    pub action_ordinal: u32,
    pub creator_action_ordinal: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_usage_us: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_usage_words: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<String>,
}

impl Action {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// `contract:action`, the form Hyperion's action filters use.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.act.account, self.act.name)
    }
}
