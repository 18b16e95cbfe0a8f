//! Nodeos chain API shapes proxied by Hyperion under `/v1/chain/*`.

use super::de::{number_or_string, option_number_or_string};
use super::{parse_timestamp, Asset, Dynamic, Permission};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `/v1/chain/get_info`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChainInfo {
    pub server_version: String,
    pub chain_id: String,
    pub head_block_num: u64,
    pub last_irreversible_block_num: u64,
    pub last_irreversible_block_id: String,
    pub head_block_id: String,
    pub head_block_time: String,
    pub head_block_producer: String,
    pub virtual_block_cpu_limit: u64,
    pub virtual_block_net_limit: u64,
    pub block_cpu_limit: u64,
    pub block_net_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_db_head_block_num: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork_db_head_block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_full_version_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_available_block_num: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_irreversible_block_time: Option<String>,
}

impl ChainInfo {
    pub fn head_block_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.head_block_time)
    }

    /// Blocks between head and the last irreversible block.
    pub fn irreversibility_lag(&self) -> u64 {
        self.head_block_num
            .saturating_sub(self.last_irreversible_block_num)
    }
}

/// Transaction entry of a block.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TransactionReceipt {
    pub status: String,
    pub cpu_usage_us: u32,
    pub net_usage_words: u32,
    /// Either the transaction id (deferred transactions) or the packed
    /// transaction object.
    pub trx: Dynamic,
}

impl TransactionReceipt {
    pub fn trx_id(&self) -> Option<&str> {
        self.trx
            .as_str()
            .or_else(|| self.trx.get("id").and_then(|id| id.as_str()))
    }
}

/// `/v1/chain/get_block`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Block {
    pub timestamp: String,
    pub producer: String,
    pub confirmed: u16,
    /// Id of the previous block.
    pub previous: String,
    pub transaction_mroot: String,
    pub action_mroot: String,
    pub schedule_version: u32,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub new_producers: Dynamic,
    pub producer_signature: String,
    pub transactions: Vec<TransactionReceipt>,
    pub id: String,
    pub block_num: u64,
    pub ref_block_prefix: u64,
}

impl Block {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// Net or CPU limit of an account. Passed through as reported by the node.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ResourceLimit {
    #[serde(with = "number_or_string")]
    pub used: i64,
    #[serde(with = "number_or_string")]
    pub available: i64,
    #[serde(with = "number_or_string")]
    pub max: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_usage_update_time: Option<String>,
    #[serde(
        with = "option_number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_used: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TotalResources {
    pub owner: String,
    pub net_weight: Asset,
    pub cpu_weight: Asset,
    #[serde(with = "number_or_string")]
    pub ram_bytes: i64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DelegatedBandwidth {
    pub from: String,
    pub to: String,
    pub net_weight: Asset,
    pub cpu_weight: Asset,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RefundRequest {
    pub owner: String,
    pub request_time: String,
    pub net_amount: Asset,
    pub cpu_amount: Asset,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VoterInfo {
    pub owner: String,
    pub proxy: String,
    pub producers: Vec<String>,
    #[serde(with = "number_or_string")]
    pub staked: i64,
    pub last_vote_weight: String,
    pub proxied_vote_weight: String,
    pub is_proxy: u8,
    pub flags1: u32,
    pub reserved2: u32,
    pub reserved3: String,
}

impl VoterInfo {
    pub fn is_proxy(&self) -> bool {
        self.is_proxy != 0
    }
}

/// `/v1/chain/get_account`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChainAccount {
    pub account_name: String,
    pub head_block_num: u64,
    pub head_block_time: String,
    pub privileged: bool,
    pub last_code_update: String,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_liquid_balance: Option<Asset>,
    #[serde(with = "number_or_string")]
    pub ram_quota: i64,
    #[serde(with = "number_or_string")]
    pub net_weight: i64,
    #[serde(with = "number_or_string")]
    pub cpu_weight: i64,
    pub net_limit: ResourceLimit,
    pub cpu_limit: ResourceLimit,
    #[serde(with = "number_or_string")]
    pub ram_usage: i64,
    pub permissions: Vec<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_resources: Option<TotalResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_delegated_bandwidth: Option<DelegatedBandwidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_request: Option<RefundRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voter_info: Option<VoterInfo>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub rex_info: Dynamic,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub subjective_cpu_bill_limit: Dynamic,
}

impl ChainAccount {
    pub fn created(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created)
    }

    pub fn permission(&self, name: &str) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.perm_name == name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiType {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiStruct {
    pub name: String,
    pub base: String,
    pub fields: Vec<AbiField>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiAction {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub ricardian_contract: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiTable {
    pub name: String,
    pub index_type: String,
    pub key_names: Vec<String>,
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiRicardianClause {
    pub id: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiErrorMessage {
    #[serde(with = "number_or_string")]
    pub error_code: u64,
    pub error_msg: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiVariant {
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AbiActionResult {
    pub name: String,
    pub result_type: String,
}

/// Contract ABI.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Abi {
    pub version: String,
    pub types: Vec<AbiType>,
    pub structs: Vec<AbiStruct>,
    pub actions: Vec<AbiAction>,
    pub tables: Vec<AbiTable>,
    pub ricardian_clauses: Vec<AbiRicardianClause>,
    pub error_messages: Vec<AbiErrorMessage>,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub abi_extensions: Dynamic,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<AbiVariant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action_results: Vec<AbiActionResult>,
}

impl Abi {
    pub fn find_struct(&self, name: &str) -> Option<&AbiStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Struct describing the payload of `action`.
    pub fn action_struct(&self, action: &str) -> Option<&AbiStruct> {
        let action = self.actions.iter().find(|a| a.name == action)?;
        self.find_struct(&action.type_)
    }
}

/// `/v1/chain/get_abi`. `abi` is absent for accounts without a contract.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetAbiResponse {
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<Abi>,
}

/// Entry of `/v1/chain/get_currency_stats`, keyed by symbol code.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CurrencyStats {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: String,
}

pub type CurrencyStatsBySymbol = BTreeMap<String, CurrencyStats>;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Producer {
    pub owner: String,
    pub total_votes: String,
    pub producer_key: String,
    pub is_active: u8,
    pub url: String,
    pub unpaid_blocks: u32,
    pub last_claim_time: String,
    pub location: u16,
    #[serde(skip_serializing_if = "Dynamic::is_absent")]
    pub producer_authority: Dynamic,
}

impl Producer {
    pub fn total_votes(&self) -> Option<f64> {
        self.total_votes.parse().ok()
    }
}

/// `/v1/chain/get_producers`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetProducersResponse {
    pub rows: Vec<Producer>,
    pub total_producer_vote_weight: String,
    /// Lower bound for the next page; empty on the last page.
    pub more: String,
}

/// `/v1/chain/get_table_rows`. Rows are contract-defined.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetTableRowsResponse {
    pub rows: Vec<Dynamic>,
    pub more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_json() -> serde_json::Value {
        json!({
            "account_name": "alice",
            "head_block_num": 1000,
            "head_block_time": "2024-01-01T00:00:00.000",
            "privileged": false,
            "last_code_update": "1970-01-01T00:00:00.000",
            "created": "2019-05-01T12:00:00.000",
            "core_liquid_balance": "12.3456 EOS",
            "ram_quota": 5000,
            "net_weight": "10000",
            "cpu_weight": 10000,
            "net_limit": {"used": 100, "available": "900", "max": 1000},
            "cpu_limit": {"used": 2000, "available": 0, "max": 1500, "current_used": 1800},
            "ram_usage": 3000,
            "permissions": [{
                "perm_name": "active",
                "parent": "owner",
                "required_auth": {
                    "threshold": 1,
                    "keys": [{"key": "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV", "weight": 1}],
                    "accounts": [],
                    "waits": []
                }
            }],
            "total_resources": {
                "owner": "alice",
                "net_weight": "1.0000 EOS",
                "cpu_weight": "1.0000 EOS",
                "ram_bytes": 5000
            },
            "voter_info": {
                "owner": "alice",
                "proxy": "",
                "producers": ["bp1", "bp2"],
                "staked": 20000,
                "last_vote_weight": "0.00000000000000000",
                "proxied_vote_weight": "0.00000000000000000",
                "is_proxy": 0,
                "flags1": 0,
                "reserved2": 0,
                "reserved3": "0.0000 EOS"
            },
            "rex_info": null
        })
    }

    #[test]
    fn chain_account_passes_limits_through() {
        let account: ChainAccount = serde_json::from_value(account_json()).expect("deserialize");
        assert_eq!(account.net_weight, 10_000);
        assert_eq!(account.net_limit.available, 900);
        // used above max is reported as is
        assert!(account.cpu_limit.used > account.cpu_limit.max);
        assert_eq!(account.cpu_limit.current_used, Some(1800));
        assert_eq!(
            account.core_liquid_balance.as_ref().map(ToString::to_string),
            Some("12.3456 EOS".to_string())
        );
        assert_eq!(
            account.permission("active").map(|p| p.required_auth.threshold),
            Some(1)
        );
        assert!(account.permission("owner").is_none());
        assert!(account.rex_info.is_absent());
        assert!(account.refund_request.is_none());
        assert!(!account.voter_info.as_ref().is_some_and(VoterInfo::is_proxy));
        assert!(account.created().is_some());
    }

    #[test]
    fn block_transactions_expose_ids() {
        let block: Block = serde_json::from_value(json!({
            "timestamp": "2024-01-01T00:00:00.500",
            "producer": "eosnationftw",
            "confirmed": 0,
            "previous": "0000000a",
            "transaction_mroot": "aa",
            "action_mroot": "bb",
            "schedule_version": 3,
            "new_producers": null,
            "producer_signature": "SIG_K1_x",
            "transactions": [
                {"status": "executed", "cpu_usage_us": 100, "net_usage_words": 12, "trx": "deferredid"},
                {"status": "executed", "cpu_usage_us": 200, "net_usage_words": 16,
                 "trx": {"id": "packedid", "signatures": [], "packed_trx": "00"}}
            ],
            "id": "0000000b",
            "block_num": 11,
            "ref_block_prefix": 12345
        }))
        .expect("deserialize");
        let ids: Vec<_> = block
            .transactions
            .iter()
            .filter_map(TransactionReceipt::trx_id)
            .collect();
        assert_eq!(ids, ["deferredid", "packedid"]);
        assert_eq!(block.previous, "0000000a");
        assert!(block.new_producers.is_absent());
    }

    #[test]
    fn abi_action_struct_lookup() {
        let abi: Abi = serde_json::from_value(json!({
            "version": "eosio::abi/1.1",
            "structs": [{"name": "transfer", "base": "", "fields": [
                {"name": "from", "type": "name"},
                {"name": "quantity", "type": "asset"}
            ]}],
            "actions": [{"name": "transfer", "type": "transfer", "ricardian_contract": ""}]
        }))
        .expect("deserialize");
        let fields = &abi.action_struct("transfer").expect("struct").fields;
        assert_eq!(fields[1].type_, "asset");
        assert!(abi.action_struct("issue").is_none());
    }

    #[test]
    fn info_lag() {
        let info = ChainInfo {
            head_block_num: 110,
            last_irreversible_block_num: 100,
            ..Default::default()
        };
        assert_eq!(info.irreversibility_lag(), 10);
    }

    #[test]
    fn resource_limit_current_used_accepts_strings() {
        let limit: ResourceLimit = serde_json::from_value(json!({
            "used": "5000000000",
            "available": "0",
            "max": "5000000000",
            "current_used": "5000000000"
        }))
        .expect("deserialize");
        assert_eq!(limit.current_used, Some(5_000_000_000));

        let limit: ResourceLimit =
            serde_json::from_value(json!({"used": 1, "current_used": null})).expect("deserialize");
        assert_eq!(limit.current_used, None);
        let limit: ResourceLimit =
            serde_json::from_value(json!({"used": 1})).expect("deserialize");
        assert_eq!(limit.current_used, None);
    }

    #[test]
    fn abi_error_code_accepts_strings() {
        let message: AbiErrorMessage = serde_json::from_value(json!({
            "error_code": "10000000000000000000",
            "error_msg": "overdrawn balance"
        }))
        .expect("deserialize");
        assert_eq!(message.error_code, 10_000_000_000_000_000_000);
        assert_eq!(message.error_msg, "overdrawn balance");
    }
}
