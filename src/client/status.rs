use super::{HyperionClient, Result};
use crate::types::Health;

#[derive(Clone, Copy, Debug)]
pub struct StatusApi<'a> {
    client: &'a HyperionClient,
}

impl<'a> StatusApi<'a> {
    pub(super) fn new(client: &'a HyperionClient) -> Self {
        Self { client }
    }

    /// Service health and enabled indexer features.
    pub async fn health(&self) -> Result<Health> {
        self.client.get("/v2/health", Vec::new()).await
    }
}
