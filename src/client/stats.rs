use super::{HyperionClient, Result};
use crate::query_helpers::{MissedBlocksQuery, Query, TimeBound};
use crate::types::*;
use chrono::NaiveDateTime;

/// Indexer statistics.
#[derive(Clone, Copy, Debug)]
pub struct StatsApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> StatsApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    /// Action count over `period` (such as `"1h"` or `"24h"`) ending at
    /// `end_date`, or now when `None`.
    pub async fn get_action_usage(
        &self,
        period: &str,
        end_date: Option<NaiveDateTime>,
        unique_actors: Option<bool>,
    ) -> Result<ActionUsage> {
        let query = Query::new()
            .with("period", period)
            .with_opt("end_date", end_date.map(TimeBound::Time))
            .with_opt("unique_actors", unique_actors)
            .into_pairs();
        self.client.get("/v2/stats/get_action_usage", query).await
    }

    pub async fn get_missed_blocks(&self, query: &MissedBlocksQuery) -> Result<MissedBlocks> {
        self.client
            .get("/v2/stats/get_missed_blocks", query.to_query())
            .await
    }

    /// CPU and NET usage distribution of `code::action`.
    pub async fn get_resource_usage(&self, code: &str, action: &str) -> Result<ResourceUsage> {
        let query = Query::new()
            .with("code", code)
            .with("action", action)
            .into_pairs();
        self.client.get("/v2/stats/get_resource_usage", query).await
    }
}
