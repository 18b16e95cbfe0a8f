use super::{HyperionClient, Result};
use crate::query_helpers::{BlockNumOrId, ProducersQuery, TableRowsQuery};
use crate::types::*;
use serde::Serialize;

#[derive(Serialize)]
struct BlockRequest<'a> {
    block_num_or_id: &'a BlockNumOrId,
}

#[derive(Serialize)]
struct AccountRequest<'a> {
    account_name: &'a str,
}

#[derive(Serialize)]
struct CurrencyBalanceRequest<'a> {
    code: &'a str,
    account: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
}

#[derive(Serialize)]
struct CurrencyStatsRequest<'a> {
    code: &'a str,
    symbol: &'a str,
}

/// Nodeos chain API, proxied by Hyperion under `/v1/chain`.
#[derive(Clone, Copy, Debug)]
pub struct ChainApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> ChainApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    /// Returns head and irreversible block information.
    pub async fn get_info(&self) -> Result<ChainInfo> {
        self.client.get("/v1/chain/get_info", Vec::new()).await
    }

    /// Returns a block by number or id.
    pub async fn get_block(&self, block: impl Into<BlockNumOrId>) -> Result<Block> {
        let block = block.into();
        let body = BlockRequest {
            block_num_or_id: &block,
        };
        self.client.post("/v1/chain/get_block", &body).await
    }

    /// Returns the on-chain account record.
    pub async fn get_account(&self, account: &str) -> Result<ChainAccount> {
        let body = AccountRequest {
            account_name: account,
        };
        self.client.post("/v1/chain/get_account", &body).await
    }

    /// Returns the contract ABI deployed on `account`.
    pub async fn get_abi(&self, account: &str) -> Result<GetAbiResponse> {
        let body = AccountRequest {
            account_name: account,
        };
        self.client.post("/v1/chain/get_abi", &body).await
    }

    /// Returns the balances `account` holds on token contract `code`,
    /// optionally restricted to one symbol.
    pub async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: Option<&str>,
    ) -> Result<Vec<Asset>> {
        let body = CurrencyBalanceRequest {
            code,
            account,
            symbol,
        };
        self.client
            .post("/v1/chain/get_currency_balance", &body)
            .await
    }

    /// Returns supply information keyed by symbol code.
    pub async fn get_currency_stats(
        &self,
        code: &str,
        symbol: &str,
    ) -> Result<CurrencyStatsBySymbol> {
        let body = CurrencyStatsRequest { code, symbol };
        self.client
            .post("/v1/chain/get_currency_stats", &body)
            .await
    }

    /// Returns one page of registered producers.
    pub async fn get_producers(&self, query: &ProducersQuery) -> Result<GetProducersResponse> {
        self.client.post("/v1/chain/get_producers", query).await
    }

    /// Returns rows of a contract table.
    pub async fn get_table_rows(&self, query: &TableRowsQuery) -> Result<GetTableRowsResponse> {
        self.client.post("/v1/chain/get_table_rows", query).await
    }
}
