use super::{HyperionClient, Result};
use crate::query_helpers::{BlockNumOrId, DeltasQuery, Query};
use crate::types::*;
use serde::Serialize;

#[derive(Serialize)]
struct BlockTraceRequest<'a> {
    block_num: &'a BlockNumOrId,
}

/// Transactions, table deltas, ABI history and block traces.
#[derive(Clone, Copy, Debug)]
pub struct HistoryApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> HistoryApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    /// Returns the actions of transaction `id`.
    ///
    /// An unknown id is not an error at this layer: Hyperion answers with
    /// `executed: false` and no actions.
    pub async fn get_transaction(&self, id: &str) -> Result<GetTransactionResponse> {
        let query = Query::new().with("id", id).into_pairs();
        self.client.get("/v2/history/get_transaction", query).await
    }

    pub async fn get_deltas(&self, query: &DeltasQuery) -> Result<GetDeltasResponse> {
        self.client
            .get("/v2/history/get_deltas", query.to_query())
            .await
    }

    /// Returns the ABI `contract` had at `block` (latest when `None`), or
    /// `None` when no ABI was ever indexed for it.
    pub async fn get_abi_snapshot(
        &self,
        contract: &str,
        block: Option<u64>,
    ) -> Result<Option<AbiSnapshot>> {
        let query = Query::new()
            .with("contract", contract)
            .with_opt("block", block)
            .with("fetch", true)
            .into_pairs();
        self.client
            .get_optional("/v2/history/get_abi_snapshot", query)
            .await
    }

    /// Returns the trace of a block through the trace API plugin.
    pub async fn get_block_trace(&self, block: impl Into<BlockNumOrId>) -> Result<BlockTrace> {
        let block = block.into();
        let body = BlockTraceRequest { block_num: &block };
        self.client.post("/v1/trace_api/get_block", &body).await
    }
}
