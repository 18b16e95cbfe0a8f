//! Account-centric responses (`/v2/state/*` and account lookups under
//! `/v2/history/*`).

use super::{parse_timestamp, Action, ChainAccount, ResponseMeta};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `/v2/state/get_account`: the chain account plus its indexed links, tokens
/// and latest actions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetAccountResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub account: ChainAccount,
    pub links: Vec<Link>,
    pub tokens: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_actions: Option<u64>,
    pub actions: Vec<Action>,
}

/// `/v2/history/get_creator`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetCreatorResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub account: String,
    pub creator: String,
    pub timestamp: String,
    pub block_num: u64,
    pub trx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indirect_creator: Option<String>,
}

impl GetCreatorResponse {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CreatedAccount {
    pub name: String,
    pub timestamp: String,
    pub trx_id: String,
}

/// `/v2/history/get_created_accounts`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetCreatedAccountsResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub accounts: Vec<CreatedAccount>,
}

/// A `linkauth` binding of a contract action to a permission.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Link {
    pub block_num: u64,
    pub timestamp: String,
    pub account: String,
    pub permission: String,
    pub code: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irreversible: Option<bool>,
}

/// `/v2/state/get_links`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetLinksResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub links: Vec<Link>,
}

/// Token balance held by an account.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Token {
    pub symbol: String,
    pub precision: u8,
    pub amount: f64,
    pub contract: String,
}

/// `/v2/state/get_tokens`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetTokensResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub account: String,
    pub tokens: Vec<Token>,
}

impl GetTokensResponse {
    /// Finds a balance by contract and symbol code.
    pub fn balance(&self, contract: &str, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.contract == contract && t.symbol == symbol)
    }
}

/// `/v2/history/get_actions`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GetActionsResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub actions: Vec<Action>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creator_fields_and_meta() {
        let creator: GetCreatorResponse = serde_json::from_value(json!({
            "query_time_ms": 2.5,
            "account": "alice",
            "creator": "eosio",
            "timestamp": "2024-01-01T00:00:00",
            "block_num": 500,
            "trx_id": "abc123"
        }))
        .expect("deserialize");
        assert_eq!(creator.account, "alice");
        assert_eq!(creator.meta.query_time_ms, Some(2.5));
        assert_eq!(creator.indirect_creator, None);
        assert!(creator.timestamp().is_some());
    }

    #[test]
    fn tokens_balance_lookup() {
        let tokens: GetTokensResponse = serde_json::from_value(json!({
            "account": "alice",
            "tokens": [
                {"symbol": "EOS", "precision": 4, "amount": 12.5, "contract": "eosio.token"},
                {"symbol": "DAPP", "precision": 4, "amount": 3, "contract": "dappservices"}
            ]
        }))
        .expect("deserialize");
        let dapp = tokens.balance("dappservices", "DAPP").expect("dapp");
        assert_eq!(dapp.amount, 3.0);
        assert!(tokens.balance("eosio.token", "DAPP").is_none());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<GetLinksResponse>(json!({"links": "none"}));
        assert!(result.is_err());
    }
}
